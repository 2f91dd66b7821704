pub mod requests;
pub mod responses;

pub use requests::{LoginRequest, SignupRequest, VerifyOtpRequest};
pub use responses::{LoginResponse, RefreshTokenResponse, SignupResponse, VerifyOtpResponse};
