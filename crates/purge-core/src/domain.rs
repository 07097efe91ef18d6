use std::fmt;

/// Discord user id (snowflake, kept as the string the API sends).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The account the token belongs to. Search is scoped by its id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountIdentity {
    pub id: UserId,
    pub username: String,
    /// `global_name` when the account has one, else the username.
    pub display_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Guild,
    DirectMessage,
}

impl TargetKind {
    /// Label used in console output.
    pub fn label(self) -> &'static str {
        match self {
            TargetKind::Guild => "Guild",
            TargetKind::DirectMessage => "DM",
        }
    }
}

/// A conversation to search and purge. `name` is display-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub id: String,
    pub name: String,
    pub kind: TargetKind,
}

impl Target {
    pub fn guild(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: TargetKind::Guild,
        }
    }

    pub fn direct_message(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: TargetKind::DirectMessage,
        }
    }
}
