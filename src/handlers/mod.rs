pub mod oauth;

pub use oauth::{kubeconfig_handler, login_handler, token_handler, userinfo_handler};
