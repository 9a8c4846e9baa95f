pub mod error_page;
pub mod request_id;
pub mod session;

pub use error_page::error_page_middleware;
pub use request_id::{make_span_with_request_id, request_id_middleware, RequestId};
pub use session::{require_login, session_middleware, CurrentUser, Session};
