pub mod answer_gate_service;
pub mod model_service;
pub mod parser_service;
pub mod quiz_service;
pub mod score_service;
pub mod session_service;
pub use answer_gate_service::{AbortHandle, AbortSignal, AnswerGateService, GateOutcome};
pub use model_service::{GenerationClient, GenerationRequest};
pub use parser_service::ParserService;
pub use quiz_service::QuizService;
pub use score_service::ScoreService;
pub use session_service::SessionService;
