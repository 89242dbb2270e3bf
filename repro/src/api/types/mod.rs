mod redirect;
mod response;

pub use redirect::*;
pub use response::*;
