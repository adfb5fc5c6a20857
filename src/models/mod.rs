pub mod account;
pub mod credential;
pub mod display;
pub mod token;

pub use account::{Account, NewAccount};
pub use credential::TokenCredential;
pub use display::display_name;
pub use token::{NewToken, Token};
