pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, error, header, info, prompt, success, warn};
pub use table::{categories_table, contacts_table};
pub use theme::{theme, Theme};
