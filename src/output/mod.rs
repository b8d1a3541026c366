pub mod handler;
pub mod openvex;
pub mod trivyignore;

pub use handler::OutputHandler;
pub use openvex::OpenvexHandler;
pub use trivyignore::TrivyignoreHandler;
