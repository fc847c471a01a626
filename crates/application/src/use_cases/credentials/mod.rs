mod clear_access_token;
mod set_access_token;

pub use clear_access_token::ClearAccessTokenUseCase;
pub use set_access_token::SetAccessTokenUseCase;
