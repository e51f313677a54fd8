//! Menu text and choice parsing

pub const MENU_TITLE: &str = "--------------------CONTACTS DB--------------------";
pub const ACTION_RULE: &str = "-----------------------------------------";

/// One numbered menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Edit,
    Delete,
    Search,
    Group,
    Exit,
}

impl MenuChoice {
    /// Get all menu choices in display order
    pub fn all() -> &'static [MenuChoice] {
        &[
            MenuChoice::Add,
            MenuChoice::Edit,
            MenuChoice::Delete,
            MenuChoice::Search,
            MenuChoice::Group,
            MenuChoice::Exit,
        ]
    }

    pub fn number(self) -> u8 {
        match self {
            MenuChoice::Add => 1,
            MenuChoice::Edit => 2,
            MenuChoice::Delete => 3,
            MenuChoice::Search => 4,
            MenuChoice::Group => 5,
            MenuChoice::Exit => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "Add a new contact",
            MenuChoice::Edit => "Edit an existing contact",
            MenuChoice::Delete => "Delete a contact",
            MenuChoice::Search => "Search for contacts",
            MenuChoice::Group => "Group contacts by category",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Parse a typed choice, ignoring surrounding whitespace
    pub fn parse(input: &str) -> Option<MenuChoice> {
        let input = input.trim();
        Self::all()
            .iter()
            .copied()
            .find(|choice| input == choice.number().to_string())
    }
}
