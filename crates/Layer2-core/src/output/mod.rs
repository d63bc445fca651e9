//! Output 모듈 - envelope와 렌더러

mod envelope;
mod render;

pub use envelope::{timestamp_now, Envelope, FailureEnvelope, SuccessEnvelope};
pub use render::Renderer;
