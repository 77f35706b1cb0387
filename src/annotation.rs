//! Numbered link annotations for the selected comment
//!
//! Eligible links of the selected entry get "[1] ", "[2] "... labels so the
//! digit keys (1-9, then 0 for the tenth) can open them. Later links are
//! reachable only through the command line.

use crate::config::LinkNumberPosition;
use crate::document::{EntryId, Link};
use crate::host::Host;

/// A label to attach next to one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAnnotation {
    pub entry: EntryId,
    /// Position of the link in the entry's full link list
    pub link: usize,
    /// 1-based number shown to the user
    pub number: usize,
    pub label: String,
    /// Tooltip explaining how to open the link
    pub hint: String,
    pub side: LinkNumberPosition,
}

/// Text of the label for link `number`
pub fn label(number: usize) -> String {
    format!("[{}] ", number)
}

/// Tooltip for link `number`; `cmdline_key` names the command line chord
pub fn hint(number: usize, cmdline_key: &str) -> String {
    match number {
        1..=9 => format!("press {} to open link", number),
        10 => "press 0 to open link".to_string(),
        n => format!(
            "press {} then {} and Enter to open link",
            cmdline_key, n
        ),
    }
}

/// Numberable links with their positions in `links`, in document order
pub fn eligible(links: &[Link]) -> Vec<(usize, Link)> {
    links
        .iter()
        .enumerate()
        .filter(|(_, link)| link.is_numberable())
        .map(|(pos, link)| (pos, link.clone()))
        .collect()
}

/// Annotations currently shown, at most one entry's worth
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    entry: Option<EntryId>,
    links: Vec<(usize, Link)>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry whose links are annotated
    pub fn entry(&self) -> Option<&EntryId> {
        self.entry.as_ref()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Remove every label from the annotated entry
    pub fn retract(&mut self, host: &mut dyn Host) {
        if let Some(entry) = self.entry.take() {
            tracing::trace!("Retracting {} link numbers from {}", self.links.len(), entry);
            host.clear_annotations(&entry);
        }
        self.links.clear();
    }

    /// Label the eligible links of `entry`, replacing any previous labels
    ///
    /// An entry without eligible links leaves nothing to retract.
    pub fn annotate(
        &mut self,
        entry: &EntryId,
        links: &[Link],
        side: LinkNumberPosition,
        cmdline_key: &str,
        host: &mut dyn Host,
    ) {
        self.retract(host);

        let numbered = eligible(links);
        for (i, (pos, _)) in numbered.iter().enumerate() {
            let number = i + 1;
            host.annotate_link(&LinkAnnotation {
                entry: entry.clone(),
                link: *pos,
                number,
                label: label(number),
                hint: hint(number, cmdline_key),
                side,
            });
        }

        if numbered.is_empty() {
            return;
        }
        tracing::debug!("Numbered {} links of {}", numbered.len(), entry);
        self.entry = Some(entry.clone());
        self.links = numbered;
    }

    /// The `index`th (0-based) numbered link, if `entry` is the annotated one
    pub fn link(&self, entry: &EntryId, index: usize) -> Option<&(usize, Link)> {
        if self.entry.as_ref() != Some(entry) {
            return None;
        }
        self.links.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_hints() {
        assert_eq!(label(3), "[3] ");
        assert_eq!(hint(1, "."), "press 1 to open link");
        assert_eq!(hint(9, "."), "press 9 to open link");
        assert_eq!(hint(10, "."), "press 0 to open link");
        assert_eq!(hint(11, "."), "press . then 11 and Enter to open link");
    }

    #[test]
    fn test_eligible_keeps_positions() {
        let links = vec![
            Link::inline("https://a.example", "a"),
            Link::inline("#", "anchor"),
            Link::inline("https://b.example", "b"),
        ];
        let numbered = eligible(&links);
        let positions: Vec<_> = numbered.iter().map(|(pos, _)| *pos).collect();
        assert_eq!(positions, vec![0, 2]);
    }
}
