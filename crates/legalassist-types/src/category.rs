//! Legal topic categories.
//!
//! `Category` is the fixed set of areas of law a question can be filed
//! under. `CategoryFilter` adds the client-side pseudo-category `all`,
//! which means "no filter" and is never stored on a turn.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// An area of law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Contracts,
    Family,
    Employment,
    Property,
    Ip,
    Criminal,
    Immigration,
    PersonalInjury,
    Tax,
    Bankruptcy,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 10] = [
        Category::Contracts,
        Category::Family,
        Category::Employment,
        Category::Property,
        Category::Ip,
        Category::Criminal,
        Category::Immigration,
        Category::PersonalInjury,
        Category::Tax,
        Category::Bankruptcy,
    ];

    /// Wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Contracts => "contracts",
            Category::Family => "family",
            Category::Employment => "employment",
            Category::Property => "property",
            Category::Ip => "ip",
            Category::Criminal => "criminal",
            Category::Immigration => "immigration",
            Category::PersonalInjury => "personal_injury",
            Category::Tax => "tax",
            Category::Bankruptcy => "bankruptcy",
        }
    }

    /// Human-readable name used in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Contracts => "contract",
            Category::Family => "family",
            Category::Employment => "employment",
            Category::Property => "property",
            Category::Ip => "intellectual property",
            Category::Criminal => "criminal",
            Category::Immigration => "immigration",
            Category::PersonalInjury => "personal injury",
            Category::Tax => "tax",
            Category::Bankruptcy => "bankruptcy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("invalid category: '{s}'"))
    }
}

/// Category selection attached to an incoming question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No filter.
    #[default]
    All,
    /// Focus the answer on one area of law.
    Only(Category),
}

impl CategoryFilter {
    /// The selected category, if any.
    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(c) => Some(*c),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(c) => c.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only).map_err(|_| {
            let allowed: Vec<&str> = std::iter::once("all")
                .chain(Category::ALL.iter().map(Category::as_str))
                .collect();
            format!(
                "Invalid category '{s}'. Expected one of: {}",
                allowed.join(", ")
            )
        })
    }
}
