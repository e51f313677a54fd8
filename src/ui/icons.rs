pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const SEARCH: &str = "🔍";
    pub const BOOK: &str = "📇";
    pub const FOLDER: &str = "🗂️";
    pub const DATABASE: &str = "🗄️";
}
