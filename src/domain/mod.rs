mod amount;
mod clock;
mod contribution;
mod export;
mod member;
mod statement;

pub use amount::*;
pub use clock::*;
pub use contribution::*;
pub use export::*;
pub use member::*;
pub use statement::*;
