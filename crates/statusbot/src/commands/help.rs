//! `help` command.

use crate::format;
use crate::slack::Message;

pub(super) fn run() -> Message {
    format::help()
}
