//! Account lifecycle entities: invitations and password reset tokens.

pub mod invitation;
pub mod reset;

pub use invitation::Invitation;
pub use reset::PasswordResetToken;
