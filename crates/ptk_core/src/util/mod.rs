//! Small studio utilities.

pub mod login;
pub mod url;

pub use login::get_login_name;
pub use url::sanitize_url;
