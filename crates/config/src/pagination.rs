use std::num::NonZeroU32;

const DEFAULT_PER_PAGE: NonZeroU32 = NonZeroU32::new(10).unwrap();

/// DEFAULT_PAGINATION: `false` turns listings into a single page, `true` uses the default page
/// size, and a positive integer sets the page size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PaginationValue", into = "PaginationValue")]
pub enum Pagination {
    #[default]
    Disabled,
    PerPage(NonZeroU32),
}

impl Pagination {
    pub fn is_enabled(self) -> bool {
        self != Pagination::Disabled
    }

    pub fn per_page(self) -> Option<NonZeroU32> {
        match self {
            Pagination::Disabled => None,
            Pagination::PerPage(n) => Some(n),
        }
    }
}

#[derive(Copy, Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum PaginationValue {
    Flag(bool),
    PerPage(i64),
}

impl TryFrom<PaginationValue> for Pagination {
    type Error = String;

    fn try_from(value: PaginationValue) -> Result<Self, Self::Error> {
        match value {
            PaginationValue::Flag(false) => Ok(Pagination::Disabled),
            PaginationValue::Flag(true) => Ok(Pagination::PerPage(DEFAULT_PER_PAGE)),
            PaginationValue::PerPage(n) => u32::try_from(n)
                .ok()
                .and_then(NonZeroU32::new)
                .map(Pagination::PerPage)
                .ok_or_else(|| format!("page size must be a positive integer, got {n}")),
        }
    }
}

impl From<Pagination> for PaginationValue {
    fn from(pagination: Pagination) -> Self {
        match pagination {
            Pagination::Disabled => PaginationValue::Flag(false),
            Pagination::PerPage(n) => PaginationValue::PerPage(i64::from(n.get())),
        }
    }
}
