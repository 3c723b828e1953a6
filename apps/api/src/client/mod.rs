// Client side of the extraction flow: the HTTP service client and the upload
// state machine used by the command-line frontend.

pub mod http;
pub mod upload;
