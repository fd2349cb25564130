use crate::types::Example;

pub const EXAMPLES: &[Example] = &[
    Example {
        key: "hello",
        display_name: "Hello Quantum",
        code: r#"# Hello Quantum World!
# Apply Hadamard to qubit 0
H [] [0]

# Measure the qubits
! [0]
! [1]

# Display state
P "Quantum state measured!""#,
    },
    Example {
        key: "gates",
        display_name: "Quantum Gates",
        code: r#"# Demonstrate common quantum gates

# Pauli-X (NOT) gate on qubit 0
X [] [0]

# Hadamard gate for superposition on qubit 1
H [] [1]

# Pauli-Y gate on qubit 2
Y [] [2]

# Measure all qubits
! [0]
! [1]
! [2]

P "Gates applied and measured""#,
    },
    Example {
        key: "superposition",
        display_name: "Superposition",
        code: r#"# Create superposition state

# Put both qubits in superposition
H [] [0]
H [] [1]

# Measure to collapse the superposition
! [0]
! [1]

P "Superposition collapsed""#,
    },
    Example {
        key: "entanglement",
        display_name: "Entanglement",
        code: r#"# Create entangled qubits (Bell State)

# Create superposition on first qubit
H [] [0]

# Entangle with CNOT gate
X [0] [1]

# Measure both qubits
! [0]
! [1]

P "Entangled qubits measured""#,
    },
    Example {
        key: "basic",
        display_name: "Basic Example",
        code: r#"# Basic program

# Put qubit 0 in superposition
H [] [0]

# Measure the qubit
! [0]

P "Measurement complete""#,
    },
];

pub const DEFAULT_EXAMPLE: &str = "hello";

pub fn find(key: &str) -> Option<&'static Example> {
    EXAMPLES.iter().find(|example| example.key == key)
}
