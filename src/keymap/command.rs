//! Command enum representing every bindable navigation action
//!
//! Commands are the construction-time action table: every name a keymap may
//! refer to resolves here, and the engine executes each variant directly.

use std::fmt;
use std::str::FromStr;

/// All commands that can be bound to key chords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // General
    // ========================================================================
    ToggleHelp,
    GoMode,
    ToggleCmdLine,

    // ========================================================================
    // Movement
    // ========================================================================
    MoveUp,
    MoveDown,
    MoveUpComment,
    MoveDownComment,
    MoveTop,
    MoveBottom,
    MoveUpSibling,
    MoveDownSibling,
    MoveUpThread,
    MoveDownThread,
    MoveToTopComment,
    MoveToParent,
    ShowParents,

    // ========================================================================
    // Following links
    // ========================================================================
    FollowLink,
    FollowLinkNewTab,
    FollowComments,
    FollowCommentsNewTab,
    FollowLinkAndCommentsNewTab,
    FollowLinkAndCommentsNewTabBg,
    FollowPermalink,
    FollowPermalinkNewTab,
    FollowSubreddit,
    FollowSubredditNewTab,

    // ========================================================================
    // Media
    // ========================================================================
    ToggleExpando,
    ImageSizeUp,
    ImageSizeDown,
    ImageSizeUpFine,
    ImageSizeDownFine,
    ImageMoveUp,
    ImageMoveDown,
    ImageMoveLeft,
    ImageMoveRight,
    PreviousGalleryImage,
    NextGalleryImage,
    ToggleViewImages,

    // ========================================================================
    // Entry actions
    // ========================================================================
    Hide,
    ToggleChildren,
    UpVote,
    DownVote,
    UpVoteWithoutToggling,
    DownVoteWithoutToggling,
    SavePost,
    SaveComment,
    SaveRes,
    Reply,

    // ========================================================================
    // Go mode destinations
    // ========================================================================
    Inbox,
    InboxNewTab,
    Modmail,
    ModmailNewTab,
    Profile,
    ProfileNewTab,
    FrontPage,
    SubredditFrontPage,
    Random,
    NextPage,
    PrevPage,

    // ========================================================================
    // Numbered links (1-10, 10 is bound to "0")
    // ========================================================================
    Link(u8),
    LinkNumPad(u8),

    // ========================================================================
    // Comment navigator
    // ========================================================================
    ToggleCommentNavigator,
    CommentNavigatorMoveUp,
    CommentNavigatorMoveDown,
}

/// Name and help text for every command that isn't a numbered link
const TABLE: &[(Command, &str, &str)] = &[
    (Command::ToggleHelp, "toggleHelp", "Show help for keyboard shortcuts"),
    (
        Command::GoMode,
        "goMode",
        "Enter \"go mode\" (next keypress goes to a location, e.g. front page)",
    ),
    (Command::ToggleCmdLine, "toggleCmdLine", "Launch the command line"),
    (
        Command::MoveUp,
        "moveUp",
        "Move up to the previous link or comment in flat lists",
    ),
    (
        Command::MoveDown,
        "moveDown",
        "Move down to the next link or comment in flat lists",
    ),
    (
        Command::MoveUpComment,
        "moveUpComment",
        "Move up to the previous comment on threaded comment pages",
    ),
    (
        Command::MoveDownComment,
        "moveDownComment",
        "Move down to the next comment on threaded comment pages",
    ),
    (Command::MoveTop, "moveTop", "Move to top of list (on link pages)"),
    (
        Command::MoveBottom,
        "moveBottom",
        "Move to bottom of list (on link pages)",
    ),
    (
        Command::MoveUpSibling,
        "moveUpSibling",
        "Move to previous sibling (in comments) - skips to previous sibling at the same depth",
    ),
    (
        Command::MoveDownSibling,
        "moveDownSibling",
        "Move to next sibling (in comments) - skips to next sibling at the same depth",
    ),
    (
        Command::MoveUpThread,
        "moveUpThread",
        "Move to the topmost comment of the previous thread (in comments)",
    ),
    (
        Command::MoveDownThread,
        "moveDownThread",
        "Move to the topmost comment of the next thread (in comments)",
    ),
    (
        Command::MoveToTopComment,
        "moveToTopComment",
        "Move to the topmost comment of the current thread (in comments)",
    ),
    (Command::MoveToParent, "moveToParent", "Move to parent (in comments)"),
    (Command::ShowParents, "showParents", "Display parent comments"),
    (
        Command::FollowLink,
        "followLink",
        "Follow link (link pages only)",
    ),
    (
        Command::FollowLinkNewTab,
        "followLinkNewTab",
        "Follow link in new tab (link pages only)",
    ),
    (
        Command::FollowComments,
        "followComments",
        "View comments for link (shift opens them in a new tab)",
    ),
    (
        Command::FollowCommentsNewTab,
        "followCommentsNewTab",
        "View comments for link in a new tab",
    ),
    (
        Command::FollowLinkAndCommentsNewTab,
        "followLinkAndCommentsNewTab",
        "View link and comments in new tabs",
    ),
    (
        Command::FollowLinkAndCommentsNewTabBg,
        "followLinkAndCommentsNewTabBG",
        "View link and comments in new background tabs",
    ),
    (
        Command::FollowPermalink,
        "followPermalink",
        "Open the current comment's permalink (comment pages only)",
    ),
    (
        Command::FollowPermalinkNewTab,
        "followPermalinkNewTab",
        "Open the current comment's permalink in a new tab (comment pages only)",
    ),
    (
        Command::FollowSubreddit,
        "followSubreddit",
        "Go to subreddit of selected link (link pages only)",
    ),
    (
        Command::FollowSubredditNewTab,
        "followSubredditNewTab",
        "Go to subreddit of selected link in a new tab (link pages only)",
    ),
    (
        Command::ToggleExpando,
        "toggleExpando",
        "Toggle expando (image/text/video)",
    ),
    (
        Command::ImageSizeUp,
        "imageSizeUp",
        "Increase the size of image(s) in the highlighted post area",
    ),
    (
        Command::ImageSizeDown,
        "imageSizeDown",
        "Decrease the size of image(s) in the highlighted post area",
    ),
    (
        Command::ImageSizeUpFine,
        "imageSizeUpFine",
        "Increase the size of image(s) in the highlighted post area (finer control)",
    ),
    (
        Command::ImageSizeDownFine,
        "imageSizeDownFine",
        "Decrease the size of image(s) in the highlighted post area (finer control)",
    ),
    (
        Command::ImageMoveUp,
        "imageMoveUp",
        "Move the image(s) in the highlighted post area up",
    ),
    (
        Command::ImageMoveDown,
        "imageMoveDown",
        "Move the image(s) in the highlighted post area down",
    ),
    (
        Command::ImageMoveLeft,
        "imageMoveLeft",
        "Move the image(s) in the highlighted post area left",
    ),
    (
        Command::ImageMoveRight,
        "imageMoveRight",
        "Move the image(s) in the highlighted post area right",
    ),
    (
        Command::PreviousGalleryImage,
        "previousGalleryImage",
        "View the previous image of an inline gallery",
    ),
    (
        Command::NextGalleryImage,
        "nextGalleryImage",
        "View the next image of an inline gallery",
    ),
    (
        Command::ToggleViewImages,
        "toggleViewImages",
        "Toggle \"view images\" button",
    ),
    (Command::Hide, "hide", "Hide link"),
    (
        Command::ToggleChildren,
        "toggleChildren",
        "Expand/collapse comments (comments pages only)",
    ),
    (
        Command::UpVote,
        "upVote",
        "Upvote selected link or comment (or remove the upvote)",
    ),
    (
        Command::DownVote,
        "downVote",
        "Downvote selected link or comment (or remove the downvote)",
    ),
    (
        Command::UpVoteWithoutToggling,
        "upVoteWithoutToggling",
        "Upvote selected link or comment (but don't remove the upvote)",
    ),
    (
        Command::DownVoteWithoutToggling,
        "downVoteWithoutToggling",
        "Downvote selected link or comment (but don't remove the downvote)",
    ),
    (
        Command::SavePost,
        "savePost",
        "Save the current post to your account",
    ),
    (
        Command::SaveComment,
        "saveComment",
        "Save the current comment to your account",
    ),
    (
        Command::SaveRes,
        "saveRES",
        "Save the current comment locally, preserving its original text",
    ),
    (
        Command::Reply,
        "reply",
        "Reply to current comment (comment pages only)",
    ),
    (Command::Inbox, "inbox", "Go to inbox"),
    (Command::InboxNewTab, "inboxNewTab", "Go to inbox in a new tab"),
    (Command::Modmail, "modmail", "Go to modmail"),
    (
        Command::ModmailNewTab,
        "modmailNewTab",
        "Go to modmail in a new tab",
    ),
    (Command::Profile, "profile", "Go to profile"),
    (
        Command::ProfileNewTab,
        "profileNewTab",
        "Go to profile in a new tab",
    ),
    (Command::FrontPage, "frontPage", "Go to front page"),
    (
        Command::SubredditFrontPage,
        "subredditFrontPage",
        "Go to subreddit front page",
    ),
    (Command::Random, "random", "Go to a random subreddit"),
    (
        Command::NextPage,
        "nextPage",
        "Go to next page (link list pages only)",
    ),
    (
        Command::PrevPage,
        "prevPage",
        "Go to prev page (link list pages only)",
    ),
    (
        Command::ToggleCommentNavigator,
        "toggleCommentNavigator",
        "Open Comment Navigator",
    ),
    (
        Command::CommentNavigatorMoveUp,
        "commentNavigatorMoveUp",
        "Move up using Comment Navigator",
    ),
    (
        Command::CommentNavigatorMoveDown,
        "commentNavigatorMoveDown",
        "Move down using Comment Navigator",
    ),
];

/// Numbered link slots, "link10" is the tenth
pub const LINK_SLOTS: u8 = 10;

impl Command {
    /// Every command, numbered links last
    pub fn all() -> Vec<Command> {
        let mut commands: Vec<Command> = TABLE.iter().map(|(cmd, _, _)| *cmd).collect();
        commands.extend((1..=LINK_SLOTS).map(Command::Link));
        commands.extend((1..=LINK_SLOTS).map(Command::LinkNumPad));
        commands
    }

    /// Keymap name of this command (e.g. "moveDownSibling", "link3NumPad")
    pub fn name(self) -> String {
        match self {
            Command::Link(n) => format!("link{}", n),
            Command::LinkNumPad(n) => format!("link{}NumPad", n),
            other => TABLE
                .iter()
                .find(|(cmd, _, _)| *cmd == other)
                .map(|(_, name, _)| (*name).to_string())
                .unwrap_or_default(),
        }
    }

    /// Help text shown in the shortcut listing
    pub fn description(self) -> String {
        match self {
            Command::Link(1) | Command::LinkNumPad(1) => {
                "Open first link within comment".to_string()
            }
            Command::Link(n) | Command::LinkNumPad(n) => {
                format!("Open link #{} within comment", n)
            }
            other => TABLE
                .iter()
                .find(|(cmd, _, _)| *cmd == other)
                .map(|(_, _, desc)| (*desc).to_string())
                .unwrap_or_default(),
        }
    }

    /// Numbered link commands stay out of help and go-mode listings
    pub fn is_numbered(self) -> bool {
        matches!(self, Command::Link(_) | Command::LinkNumPad(_))
    }

    /// 0-based index of the link a numbered command opens
    pub fn link_index(self) -> Option<usize> {
        match self {
            Command::Link(n) | Command::LinkNumPad(n) => Some(n as usize - 1),
            _ => None,
        }
    }

    /// Whether the handler receives the raw key event
    pub fn wants_event(self) -> bool {
        matches!(self, Command::ToggleCmdLine)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((cmd, _, _)) = TABLE.iter().find(|(_, name, _)| *name == s) {
            return Ok(*cmd);
        }

        let Some(rest) = s.strip_prefix("link") else {
            return Err(());
        };
        let (digits, numpad) = match rest.strip_suffix("NumPad") {
            Some(digits) => (digits, true),
            None => (rest, false),
        };
        let n: u8 = digits.parse().map_err(|_| ())?;
        if !(1..=LINK_SLOTS).contains(&n) {
            return Err(());
        }
        Ok(if numpad {
            Command::LinkNumPad(n)
        } else {
            Command::Link(n)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for cmd in Command::all() {
            let name = cmd.name();
            assert!(!name.is_empty(), "{:?} has no name", cmd);
            assert_eq!(Command::from_str(&name), Ok(cmd));
        }
    }

    #[test]
    fn test_every_command_has_description() {
        for cmd in Command::all() {
            assert!(!cmd.description().is_empty(), "{:?}", cmd);
        }
    }

    #[test]
    fn test_parse_links() {
        assert_eq!(Command::from_str("link1"), Ok(Command::Link(1)));
        assert_eq!(Command::from_str("link10"), Ok(Command::Link(10)));
        assert_eq!(Command::from_str("link4NumPad"), Ok(Command::LinkNumPad(4)));
        assert_eq!(Command::from_str("link11"), Err(()));
        assert_eq!(Command::from_str("link0"), Err(()));
        assert_eq!(Command::from_str("linkNumPad"), Err(()));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(Command::from_str("moveSideways"), Err(()));
    }

    #[test]
    fn test_link_index_is_zero_based() {
        assert_eq!(Command::Link(1).link_index(), Some(0));
        assert_eq!(Command::LinkNumPad(10).link_index(), Some(9));
        assert_eq!(Command::MoveDown.link_index(), None);
        assert!(Command::Link(3).is_numbered());
        assert!(!Command::GoMode.is_numbered());
    }
}
