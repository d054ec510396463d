pub mod actor;
pub mod cors;
pub mod request_context;

pub use actor::CurrentActor;
pub use cors::create_cors;
pub use request_context::{RequestContext, RequestId};
