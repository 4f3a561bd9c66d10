//! Interactive chat with conversation word-frequency analysis.
//!
//! Configuration comes from the environment (a `.env` file is honored):
//! `OPENAI_API_KEY`, `OPENAI_API_ENDPOINT`, `CHATLENS_MODEL`,
//! `CHATLENS_LANGUAGE`, `CHATLENS_CHART_DIR`, `CHATLENS_TEMPERATURE`.
//! Log verbosity follows `RUST_LOG`; logs go to stderr.

use std::sync::Arc;

use chatlens::prelude::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::from_env()?;
    let language = config.language;
    let mut surface = TerminalSurface::stdout(language, config.chart_dir.clone());

    surface.print_banner();

    // Nothing else is reachable until a credential is supplied.
    if !config.has_credential() {
        match CredentialPrompt::new()?.read_key(language.credential_prompt())? {
            Some(key) => config.api_key = key,
            None => return Ok(()),
        }
    }

    let mut editor = DefaultEditor::new()?;
    let gateway = Arc::new(OpenAIGateway::with_config(config.openai_config()));
    let broker = LlmBroker::new(&config.model, gateway).with_config(config.completion_config());
    let mut dialogue = Dialogue::new(broker, language);

    info!(session = %dialogue.conversation().id(), model = %config.model, "Session started");
    surface.render_stats(&dialogue.stats());

    loop {
        let line = match editor.readline(language.input_prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        if line.trim().is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line.as_str());

        match SurfaceAction::parse(&line) {
            Some(SurfaceAction::Quit) => break,
            Some(SurfaceAction::Clear) => {
                dialogue.clear();
                surface.notice(language.history_cleared());
            }
            None => {
                let outcome = dialogue.handle_input(&line, &mut surface).await;
                info!(session = %dialogue.conversation().id(), ?outcome, "Turn handled");
            }
        }

        surface.render_stats(&dialogue.stats());
    }

    surface.notice(language.goodbye());
    Ok(())
}
