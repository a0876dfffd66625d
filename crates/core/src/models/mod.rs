pub mod genre;
pub mod movie;
pub mod page;
pub mod setting;
pub mod video;

pub use genre::*;
pub use movie::*;
pub use page::*;
pub use setting::*;
pub use video::*;
