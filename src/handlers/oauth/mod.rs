pub mod kubeconfig_handler;
pub mod login_handler;
pub mod token_handler;
pub mod userinfo_handler;

pub use kubeconfig_handler::kubeconfig_handler;
pub use login_handler::login_handler;
pub use token_handler::token_handler;
pub use userinfo_handler::userinfo_handler;
