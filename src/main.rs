use std::process::ExitCode;

use quiz_agent::app_state::AppState;
use quiz_agent::config::Config;
use quiz_agent::console::terminal::prompt_session_request;
use quiz_agent::errors::AppError;
use quiz_agent::services::answer_gate_service::AbortSignal;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(err) => {
            log::error!("{}: {}", err.error_code(), err);
            return ExitCode::FAILURE;
        }
    };

    println!("=== Quiz Generator ===");
    let request = match prompt_session_request() {
        Ok(request) => request,
        Err(err) => {
            log::error!("{}: {}", err.error_code(), err);
            return ExitCode::FAILURE;
        }
    };

    let (abort_handle, abort) = AbortSignal::pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            abort_handle.trigger();
        }
    });

    match state.session_service.run(request, abort).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(AppError::Aborted) => {
            println!("\nQuiz terminated by user.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}: {}", err.error_code(), err);
            ExitCode::FAILURE
        }
    }
}
