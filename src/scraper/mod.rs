pub mod fetcher;
pub mod traits;
pub mod webdriver;

pub use fetcher::{HttpFactory, HttpSession};
pub use traits::{PageSession, SessionFactory};
pub use webdriver::{WebDriverFactory, WebDriverSession};
