//! Built-in command handlers

use anyhow::Result;

use super::Engine;
use crate::document::EntryId;
use crate::host::{Control, EntryUrl, Host, NavigatorRequest, OpenTarget};
use crate::keymap::{Command, PageContext, RawKeyEvent};
use crate::navigation::Direction;
use crate::scroll::ScrollStyle;

/// Pixels an image grows or shrinks per step
const RESIZE_STEP: i32 = 150;
const RESIZE_STEP_FINE: i32 = 50;
/// Pixels an image is panned per step
const MOVE_STEP: i32 = 50;

impl Engine {
    /// Run one built-in command
    ///
    /// Commands that need a selected entry do nothing without one. Only the
    /// command line toggle looks at the triggering key event.
    pub(super) fn execute(
        &mut self,
        command: Command,
        event: Option<&RawKeyEvent>,
        host: &mut dyn Host,
    ) -> Result<()> {
        use Command::*;

        match command {
            ToggleHelp => self.toggle_help(host),
            GoMode => self.toggle_go_mode(host),
            ToggleCmdLine => host.toggle_command_line(event),

            MoveUp | MoveUpComment => self.move_adjacent(Direction::Up, host)?,
            MoveDown | MoveDownComment => self.move_adjacent(Direction::Down, host)?,
            MoveTop => self.move_top(host),
            MoveBottom => self.move_bottom(host),
            MoveUpSibling => self.move_sibling(Direction::Up, host),
            MoveDownSibling => self.move_sibling(Direction::Down, host),
            MoveUpThread => self.move_thread(Direction::Up, host),
            MoveDownThread => self.move_thread(Direction::Down, host),
            MoveToTopComment => self.move_to_top_comment(host),
            MoveToParent => self.move_to_parent(host),
            ShowParents => {
                if let Some(entry) = self.selected_id() {
                    host.show_parents(&entry);
                }
            }

            FollowLink => self.follow_link(false, host)?,
            FollowLinkNewTab => self.follow_link(true, host)?,
            FollowComments => self.follow_url(EntryUrl::Comments, false, host)?,
            FollowCommentsNewTab => self.follow_url(EntryUrl::Comments, true, host)?,
            FollowLinkAndCommentsNewTab => self.click(Control::LinkAndComments, host),
            FollowLinkAndCommentsNewTabBg => {
                self.click(Control::LinkAndCommentsBackground, host)
            }
            FollowPermalink => self.follow_url(EntryUrl::Permalink, false, host)?,
            FollowPermalinkNewTab => self.follow_url(EntryUrl::Permalink, true, host)?,
            FollowSubreddit => self.follow_url(EntryUrl::Subreddit, false, host)?,
            FollowSubredditNewTab => self.follow_url(EntryUrl::Subreddit, true, host)?,

            ToggleExpando => self.toggle_expando(host),
            ImageSizeUp => self.resize_media(RESIZE_STEP, host),
            ImageSizeDown => self.resize_media(-RESIZE_STEP, host),
            ImageSizeUpFine => self.resize_media(RESIZE_STEP_FINE, host),
            ImageSizeDownFine => self.resize_media(-RESIZE_STEP_FINE, host),
            ImageMoveUp => host.move_media(0, -MOVE_STEP),
            ImageMoveDown => host.move_media(0, MOVE_STEP),
            ImageMoveLeft => host.move_media(-MOVE_STEP, 0),
            ImageMoveRight => host.move_media(MOVE_STEP, 0),
            PreviousGalleryImage => self.click(Control::GalleryPrevious, host),
            NextGalleryImage => self.click(Control::GalleryNext, host),
            ToggleViewImages => host.toggle_view_images(),

            Hide => self.hide(host)?,
            ToggleChildren => self.toggle_children(host),
            UpVote => self.vote(Control::Upvote, true, host)?,
            DownVote => self.vote(Control::Downvote, true, host)?,
            UpVoteWithoutToggling => self.vote(Control::Upvote, false, host)?,
            DownVoteWithoutToggling => self.vote(Control::Downvote, false, host)?,
            SavePost => self.save(Control::SavePost, true, host),
            SaveComment => self.save(Control::SaveComment, true, host),
            SaveRes => self.save(Control::SaveLocal, false, host),
            Reply => self.reply(host),

            Inbox => go_to("/message/inbox/", false, host)?,
            InboxNewTab => go_to("/message/inbox/", true, host)?,
            Modmail => go_to("/message/moderator/", false, host)?,
            ModmailNewTab => go_to("/message/moderator/", true, host)?,
            Profile => go_to_profile(false, host)?,
            ProfileNewTab => go_to_profile(true, host)?,
            FrontPage => go_to("/", false, host)?,
            SubredditFrontPage => {
                if let Some(subreddit) = host.current_subreddit() {
                    go_to(&format!("/r/{}", subreddit), false, host)?;
                }
            }
            Random => go_to("/r/random", false, host)?,
            NextPage => self.next_page(host)?,
            PrevPage => prev_page(host)?,

            Link(_) | LinkNumPad(_) => {
                if let Some(index) = command.link_index() {
                    self.open_link(index, host)?;
                }
            }

            ToggleCommentNavigator => host.comment_navigator(NavigatorRequest::Toggle),
            CommentNavigatorMoveUp => host.comment_navigator(NavigatorRequest::MoveUp),
            CommentNavigatorMoveDown => host.comment_navigator(NavigatorRequest::MoveDown),
        }
        Ok(())
    }

    fn selected_id(&self) -> Option<EntryId> {
        self.selection.current().cloned()
    }

    fn selected_is_root(&self, host: &dyn Host) -> bool {
        let Some(id) = self.selection.current() else {
            return false;
        };
        host.entries()
            .iter()
            .find(|entry| &entry.id == id)
            .is_some_and(|entry| entry.is_root())
    }

    fn new_tab(&self) -> OpenTarget {
        OpenTarget::NewTab {
            focus: self.config.follow_link_new_tab_focus,
        }
    }

    fn click(&self, control: Control, host: &mut dyn Host) {
        if let Some(entry) = self.selected_id() {
            if !host.activate(&entry, control) {
                tracing::debug!("{} has no {:?} control", entry, control);
            }
        }
    }

    /// Show the login prompt if nobody is logged in; true if it was shown
    fn prompt_login(&self, host: &mut dyn Host) -> bool {
        if host.logged_in_user().is_some() {
            return false;
        }
        host.prompt_login();
        true
    }

    // ========================================================================
    // Following links
    // ========================================================================

    /// Open the selected post's link; on thread pages only the post itself
    pub(super) fn follow_link(&mut self, new_tab: bool, host: &mut dyn Host) -> Result<()> {
        if host.contexts().contains(PageContext::Thread) && !self.selected_is_root(host) {
            return Ok(());
        }
        self.follow_url(EntryUrl::PostLink, new_tab, host)
    }

    fn follow_url(&self, which: EntryUrl, new_tab: bool, host: &mut dyn Host) -> Result<()> {
        let Some(entry) = self.selected_id() else {
            return Ok(());
        };
        let Some(url) = host.entry_url(&entry, which) else {
            tracing::debug!("{} has no {:?} URL", entry, which);
            return Ok(());
        };

        let target = if new_tab {
            self.new_tab()
        } else {
            OpenTarget::SameTab
        };
        host.open_url(&url, target)
    }

    // ========================================================================
    // Media
    // ========================================================================

    fn toggle_expando(&mut self, host: &mut dyn Host) {
        let Some(entry) = self.selected_id() else {
            return;
        };

        if host.contexts().contains(PageContext::Thread) {
            host.activate(&entry, Control::AllExpandos);
            return;
        }

        let Some(expanded) = host.control_state(&entry, Control::Expando) else {
            return;
        };
        host.activate(&entry, Control::Expando);
        if !expanded && self.config.scroll_on_expando {
            self.scroll_to_entry(&entry, ScrollStyle::Top, host);
        }
    }

    fn resize_media(&self, delta: i32, host: &mut dyn Host) {
        if let Some(entry) = self.selected_id() {
            host.resize_media(&entry, delta);
        }
    }

    // ========================================================================
    // Entry actions
    // ========================================================================

    fn hide(&mut self, host: &mut dyn Host) -> Result<()> {
        let Some(entry) = self.selected_id() else {
            return Ok(());
        };
        host.activate(&entry, Control::Hide);
        if self.config.on_hide_move_down {
            self.move_adjacent(Direction::Down, host)?;
        }
        Ok(())
    }

    fn toggle_children(&mut self, host: &mut dyn Host) {
        if self.selected_is_root(host) {
            return;
        }
        self.click(Control::ToggleChildren, host);
    }

    /// Vote with `control`; without `toggle` an active vote is left alone
    fn vote(&mut self, control: Control, toggle: bool, host: &mut dyn Host) -> Result<()> {
        if self.prompt_login(host) {
            return Ok(());
        }
        let Some(entry) = self.selected_id() else {
            return Ok(());
        };
        let Some(active) = host.control_state(&entry, control) else {
            return Ok(());
        };

        if host.voting_blocked() {
            host.notify_voting_blocked();
        } else if toggle || !active {
            host.activate(&entry, control);
        }

        let contexts = host.contexts();
        let on_posts =
            contexts.contains(PageContext::List) || contexts.contains(PageContext::Profile);
        let move_down = if on_posts {
            self.config.on_vote_move_down
        } else {
            self.config.on_vote_comment_move_down
        };
        if move_down {
            self.move_adjacent(Direction::Down, host)?;
        }
        Ok(())
    }

    fn save(&self, control: Control, needs_login: bool, host: &mut dyn Host) {
        if needs_login && self.prompt_login(host) {
            return;
        }
        self.click(control, host);
    }

    /// Focus a reply form for the selected entry, leaving the page if needed
    fn reply(&self, host: &mut dyn Host) {
        if self.prompt_login(host) {
            return;
        }
        let Some(entry) = self.selected_id() else {
            return;
        };

        if self.selected_is_root(host)
            && host.contexts().contains(PageContext::Thread)
            && host.focus_reply_form()
        {
            return;
        }
        if host.activate(&entry, Control::Reply) {
            return;
        }
        host.activate(&entry, Control::ReplyElsewhere);
    }

    // ========================================================================
    // Pages
    // ========================================================================

    /// Load the next page, in place when the page supports it
    ///
    /// In place, the selection goes to the last entry already on the page
    /// before more are appended.
    pub(super) fn next_page(&mut self, host: &mut dyn Host) -> Result<()> {
        let pagination = host.pagination();
        if pagination.never_ending {
            self.move_bottom(host);
            if !host.load_more() {
                tracing::debug!("Nothing more to load");
            }
            return Ok(());
        }
        match pagination.next {
            Some(url) => host.open_url(&url, OpenTarget::SameTab),
            None => Ok(()),
        }
    }
}

fn prev_page(host: &mut dyn Host) -> Result<()> {
    let pagination = host.pagination();
    if pagination.never_ending {
        return Ok(());
    }
    match pagination.prev {
        Some(url) => host.open_url(&url, OpenTarget::SameTab),
        None => Ok(()),
    }
}

fn go_to(path: &str, new_tab: bool, host: &mut dyn Host) -> Result<()> {
    let target = if new_tab {
        OpenTarget::NewTab { focus: true }
    } else {
        OpenTarget::SameTab
    };
    host.open_url(path, target)
}

fn go_to_profile(new_tab: bool, host: &mut dyn Host) -> Result<()> {
    match host.logged_in_user() {
        Some(user) => go_to(&format!("/user/{}", user), new_tab, host),
        None => Ok(()),
    }
}
