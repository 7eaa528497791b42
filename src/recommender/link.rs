use std::convert::Infallible;
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, RecommendResult};
pub use crate::utils::math::vector::TagId;

/// Item (task / post) identifier
pub type ItemId = u64;

/// "item X carries tag Y"
///
/// Rows of the profile source read as "the user liked item X, which carries tag Y".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagLink {
    pub item_id: ItemId,
    pub tag_id: TagId,
}

impl TagLink {
    #[inline]
    pub fn new(item_id: ItemId, tag_id: TagId) -> Self {
        Self { item_id, tag_id }
    }
}

impl From<(ItemId, TagId)> for TagLink {
    #[inline]
    fn from((item_id, tag_id): (ItemId, TagId)) -> Self {
        Self { item_id, tag_id }
    }
}

/// Wrap already-fetched links as a source that cannot fail
pub fn links_ok<I, L>(links: I) -> impl Iterator<Item = Result<TagLink, Infallible>>
where
    I: IntoIterator<Item = L>,
    L: Into<TagLink>,
{
    links.into_iter().map(|link| Ok(link.into()))
}

/// Line oriented tag-link source
///
/// Every non-empty line holds `item` and `tag` separated by a comma, a tab
/// or spaces. Lines starting with `#` are comments.
pub struct TagLinkReader<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> TagLinkReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            failed: false,
        }
    }

    fn parse_line(&self, line: &str) -> RecommendResult<TagLink> {
        let mut fields = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty());
        let (item, tag) = match (fields.next(), fields.next(), fields.next()) {
            (Some(item), Some(tag), None) => (item, tag),
            _ => {
                return Err(RecommendError::MalformedLink {
                    line: self.line_no,
                    reason: "expected exactly two fields: item and tag".to_string(),
                })
            }
        };
        let parse = |field: &str, what: &str| {
            field.parse::<u64>().map_err(|e| RecommendError::MalformedLink {
                line: self.line_no,
                reason: format!("invalid {} id {:?}: {}", what, field, e),
            })
        };
        Ok(TagLink::new(parse(item, "item")?, parse(tag, "tag")?))
    }
}

impl<R: BufRead> Iterator for TagLinkReader<R> {
    type Item = RecommendResult<TagLink>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            };
            self.line_no += 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let link = self.parse_line(line);
            self.failed = link.is_err();
            return Some(link);
        }
    }
}
