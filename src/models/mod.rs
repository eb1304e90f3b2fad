pub mod card;
pub mod page;
pub mod price;
pub mod record;
pub mod set;
pub mod sub;

pub use card::*;
pub use page::*;
pub use price::*;
pub use record::*;
pub use set::*;
pub use sub::*;
