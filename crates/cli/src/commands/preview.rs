//! `pairbot preview` — Group members locally and print the result.

use std::path::Path;

use pairbot_core::{Group, GroupMode, MemberId};
use pairbot_grouper::Grouper;

pub async fn run(
    config_path: Option<&Path>,
    mode: GroupMode,
    members: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let grouper = Grouper::from_config(&config.grouping);

    let members: Vec<MemberId> = members.into_iter().map(MemberId).collect();
    let total = members.len();
    let groups = grouper.groups_for(members, mode);

    println!("🎲 {total} member(s) → {} {mode} group(s):", groups.len());
    print!("{}", render(&groups));
    Ok(())
}

fn render(groups: &[Group]) -> String {
    groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let names: Vec<&str> = group.iter().map(MemberId::as_str).collect();
            format!("  {:>3}. {}\n", i + 1, names.join(", "))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_numbers_groups() {
        let groups = vec![
            vec![MemberId::from("U1"), MemberId::from("U2")],
            vec![MemberId::from("U3"), MemberId::from("U4"), MemberId::from("U5")],
        ];
        let out = render(&groups);
        assert_eq!(out, "    1. U1, U2\n    2. U3, U4, U5\n");
    }
}
