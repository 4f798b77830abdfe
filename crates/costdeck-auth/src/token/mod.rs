mod claims;
mod codec;

pub use claims::Claims;
pub use codec::TokenCodec;
