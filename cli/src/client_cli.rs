use playground::{
    catalog, Config, ExecutionResult, OutputLine, RunState, SessionController, Severity,
    SinkEvent, PLACEHOLDER,
};
use std::error;
use tokio::io::{self, AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio_stream::{wrappers::WatchStream, StreamExt};

type Result<T> = std::result::Result<T, Box<dyn error::Error>>;

const HELP: &str = "\
Type program lines to append them to the editor. Commands:
  :run            run the editor contents
  :clear          empty the editor
  :load KEY       load a bundled example (see :examples)
  :examples       list bundled examples
  :show           print the editor contents
  :output         print the current output
  :reset          clear the output
  :status         print server and run status
  :quit           leave";

pub struct ClientCli {
    session: SessionController,
    config: Config,
}

impl ClientCli {
    pub fn connect(config: Config) -> Result<Self> {
        let session = SessionController::spawn(&config)?;
        Ok(Self { session, config })
    }

    /// Run one program and print the output. Returns whether it succeeded.
    pub async fn run_once(&self, source: String) -> bool {
        self.session.set_editor_text(source);
        let outcome = self.session.run().await;
        print_lines(&self.session.sink().snapshot().await);
        matches!(outcome, Ok(ExecutionResult::Success { .. }))
    }

    pub async fn run_example(&self, key: &str) -> Result<bool> {
        if self.session.load_example(key).is_none() {
            return Err(format!("unknown example {:?}, try `playground examples`", key).into());
        }
        Ok(self.run_once(self.session.editor_text()).await)
    }

    pub async fn run_stdin(&self) -> Result<bool> {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).await?;
        Ok(self.run_once(source).await)
    }

    pub fn list_examples(&self) {
        for example in catalog::EXAMPLES {
            println!("{:<15} {}", example.key, example.display_name);
        }
    }

    pub async fn check_health(&self) -> bool {
        let status = self.session.health().probe_once().await;
        println!("{} ({})", status, self.config.server_url);
        status == playground::HealthStatus::Online
    }

    pub async fn watch_health(&self) -> Result<()> {
        let health = self.session.health();
        health.start_periodic(self.config.health_interval())?;
        let mut statuses = WatchStream::new(health.subscribe());
        println!("watching {} (Ctrl-C to stop)", self.config.server_url);
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = async {
                while let Some(status) = statuses.next().await {
                    println!("server: {}", status);
                }
            } => {}
        }
        health.stop();
        Ok(())
    }

    pub async fn interactive(&self) -> Result<()> {
        let session = &self.session;
        session
            .health()
            .start_periodic(self.config.health_interval())?;
        session.load_example(catalog::DEFAULT_EXAMPLE);

        let mut sink_events = session.sink().subscribe();
        tokio::spawn(async move {
            while let Some(event) = sink_events.recv().await {
                match event {
                    SinkEvent::Line(line) => println!("{}", render(&line)),
                    SinkEvent::Cleared => println!("----"),
                }
            }
        });
        let mut statuses = WatchStream::new(session.health().subscribe());
        tokio::spawn(async move {
            while let Some(status) = statuses.next().await {
                println!("[server: {}]", status);
            }
        });

        println!("{}", HELP);
        let mut lines = BufReader::new(io::stdin()).lines();
        while let Some(input) = lines.next_line().await? {
            let trimmed = input.trim();
            let (command, arg) = trimmed
                .split_once(char::is_whitespace)
                .map(|(command, arg)| (command, arg.trim()))
                .unwrap_or((trimmed, ""));
            match command {
                ":run" => {
                    // results arrive through the sink printer
                    let session = session.clone();
                    tokio::spawn(async move { session.run().await });
                }
                ":clear" => session.clear_editor(),
                ":load" => {
                    session.load_example(arg);
                }
                ":examples" => self.list_examples(),
                ":show" => println!("{}", session.editor_text()),
                ":output" => print_lines(&session.sink().snapshot().await),
                ":reset" => session.sink().clear(),
                ":status" => {
                    let run = match session.run_state() {
                        RunState::Idle => "idle",
                        RunState::Running => "running",
                    };
                    println!("server: {}, run: {}", session.health().status(), run);
                }
                ":help" => println!("{}", HELP),
                ":quit" | ":q" => break,
                other if other.starts_with(':') => println!("unknown command {}, try :help", other),
                _ => session.append_editor_line(&input),
            }
        }
        session.health().stop();
        Ok(())
    }
}

fn render(line: &OutputLine) -> String {
    match line.severity {
        Severity::Normal => line.text.clone(),
        severity => format!("[{}] {}", severity, line.text),
    }
}

fn print_lines(lines: &[OutputLine]) {
    if lines.is_empty() {
        println!("{}", PLACEHOLDER);
    }
    for line in lines {
        println!("{}", render(line));
    }
}
