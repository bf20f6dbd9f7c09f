//! Slack message templates built with the Block Kit format.

use pairbot_core::{ChannelId, GroupMode, MemberId};
use serde_json::{Value, json};

/// Slack mention markup for a member.
pub fn mention(member: &MemberId) -> String {
    format!("<@{member}>")
}

/// Join items as an English list: `a`, `a and b`, `a, b, and c`.
pub fn to_sentence(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

fn mentions(members: &[MemberId]) -> String {
    let names: Vec<String> = members.iter().map(mention).collect();
    to_sentence(&names)
}

fn section(block_id: &str, text: String) -> Value {
    json!([
        {
            "type": "section",
            "block_id": block_id,
            "text": {
                "type": "mrkdwn",
                "text": text,
            }
        }
    ])
}

/// Plain-text intro used both inside the blocks and as the notification fallback.
///
/// `channel` is the channel the members were grouped from.
pub fn intro_text(members: &[MemberId], mode: GroupMode, channel: &ChannelId) -> String {
    let names = mentions(members);
    match (mode, members.len()) {
        // a channel with a single member yields one group of one
        (GroupMode::Pairing, 1) => format!(
            ":wave: Hi {names}! You're the only one signed up for coffee chats from <#{channel}> \
             this round, so there's no one to pair you with yet. Invite a colleague to join!"
        ),
        (GroupMode::Pairing, len) => {
            let who = if len == 2 { "both" } else { "all" };
            format!(
                ":wave: Hi {names}! You've {who} been paired up for a coffee chat from <#{channel}>! \
                 Find a time to meet (Calendly is great for this) and have fun!"
            )
        }
        (GroupMode::Group, _) => format!(
            ":wave: Hi {names}! You've been grouped up for a chat from <#{channel}>! \
             Find a time that works for everyone and have fun!"
        ),
    }
}

/// Intro blocks for a pair.
pub fn pair_message(pair: &[MemberId], channel: &ChannelId) -> Value {
    section("pair_introduction", intro_text(pair, GroupMode::Pairing, channel))
}

/// Intro blocks for a larger group.
pub fn group_message(group: &[MemberId], channel: &ChannelId) -> Value {
    section("group_introduction", intro_text(group, GroupMode::Group, channel))
}

/// Intro blocks for `mode`.
pub fn intro_blocks(members: &[MemberId], mode: GroupMode, channel: &ChannelId) -> Value {
    match mode {
        GroupMode::Pairing => pair_message(members, channel),
        GroupMode::Group => group_message(members, channel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<MemberId> {
        raw.iter().map(|s| MemberId::from(*s)).collect()
    }

    #[test]
    fn sentence_joining() {
        let s = |v: &[&str]| to_sentence(&v.iter().map(|x| x.to_string()).collect::<Vec<_>>());
        assert_eq!(s(&[]), "");
        assert_eq!(s(&["a"]), "a");
        assert_eq!(s(&["a", "b"]), "a and b");
        assert_eq!(s(&["a", "b", "c"]), "a, b, and c");
    }

    #[test]
    fn pair_message_mentions_both_and_links_channel() {
        let channel = ChannelId::from("C0PAIRS");
        let blocks = pair_message(&ids(&["U1", "U2"]), &channel);

        assert_eq!(blocks[0]["block_id"], "pair_introduction");
        assert_eq!(blocks[0]["text"]["type"], "mrkdwn");
        let text = blocks[0]["text"]["text"].as_str().unwrap();
        assert!(text.contains("<@U1> and <@U2>"));
        assert!(text.contains("You've both been paired"));
        assert!(text.contains("from <#C0PAIRS>"));
    }

    #[test]
    fn rebalanced_trio_is_greeted_as_all() {
        let text = intro_text(&ids(&["U1", "U2", "U3"]), GroupMode::Pairing, &"C0PAIRS".into());
        assert!(text.contains("<@U1>, <@U2>, and <@U3>"));
        assert!(text.contains("You've all been paired"));
    }

    #[test]
    fn lone_member_is_not_told_they_were_paired() {
        let text = intro_text(&ids(&["U1"]), GroupMode::Pairing, &"C0PAIRS".into());
        assert!(text.starts_with(":wave: Hi <@U1>!"));
        assert!(text.contains("only one signed up"));
        assert!(text.contains("from <#C0PAIRS>"));
        assert!(!text.contains("paired up"));
        assert!(!text.contains("You've all"));

        let blocks = pair_message(&ids(&["U1"]), &"C0PAIRS".into());
        assert_eq!(blocks[0]["block_id"], "pair_introduction");
    }

    #[test]
    fn intro_blocks_follow_mode() {
        let channel = ChannelId::from("C0GROUPS");
        let blocks = intro_blocks(&ids(&["U1", "U2", "U3", "U4"]), GroupMode::Group, &channel);
        assert_eq!(blocks[0]["block_id"], "group_introduction");
        let text = blocks[0]["text"]["text"].as_str().unwrap();
        assert!(text.contains("grouped up"));
        assert!(text.contains("from <#C0GROUPS>"));
    }
}
