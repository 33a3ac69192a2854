//! Turns a catalog snapshot into view models and card markup.
//!
//! Everything here is pure: the platform surfaces decide how the resulting
//! [`CatalogView`] reaches the screen.

use crate::model::{ActivityCatalog, ActivityRecord};

pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";
pub const LOAD_FAILURE: &str = "Failed to load activities. Please try again later.";

/// Escape text for interpolation into HTML content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Avatar initials derived from an identity key such as `first.last@host`.
pub fn initials(identity: &str) -> String {
    let local = identity.split('@').next().unwrap_or("");
    let parts: Vec<&str> = local
        .split(['.', '-', '_', ' '])
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [] => local
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect()),
        [only] => only.chars().take(2).collect::<String>().to_uppercase(),
        [first, second, ..] => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}

/// A remove button's target, captured when the card is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveBinding {
    pub activity: String,
    pub identity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantView {
    pub display: String,
    pub identity: String,
    pub initials: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub activity: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: Vec<ParticipantView>,
    /// Inner HTML of the card, every interpolated value escaped.
    pub html: String,
}

impl CardView {
    pub fn build(activity: &str, record: &ActivityRecord) -> Self {
        let participants: Vec<ParticipantView> = record
            .participants
            .iter()
            .map(|p| {
                let identity = p.identity();
                ParticipantView {
                    initials: initials(&identity.key),
                    display: identity.display,
                    identity: identity.key,
                }
            })
            .collect();

        let spots_left = record.spots_left();
        let html = card_html(activity, record, spots_left, &participants);

        Self {
            activity: activity.to_string(),
            description: record.description().to_string(),
            schedule: record.schedule().to_string(),
            spots_left,
            participants,
            html,
        }
    }

    /// Remove targets, in the same order as the card's remove buttons.
    pub fn removals(&self) -> Vec<RemoveBinding> {
        self.participants
            .iter()
            .map(|p| RemoveBinding {
                activity: self.activity.clone(),
                identity: p.identity.clone(),
            })
            .collect()
    }
}

fn card_html(
    activity: &str,
    record: &ActivityRecord,
    spots_left: i64,
    participants: &[ParticipantView],
) -> String {
    let roster = if participants.is_empty() {
        r#"<div class="participants empty">No participants yet</div>"#.to_string()
    } else {
        let rows: String = participants
            .iter()
            .map(|p| {
                format!(
                    concat!(
                        "<li>",
                        r#"<span class="avatar">{initials}</span>"#,
                        r#"<span class="name">{display}</span>"#,
                        r#"<button class="delete-btn" data-activity="{activity}" data-email="{identity}">&times;</button>"#,
                        "</li>"
                    ),
                    initials = escape_html(&p.initials),
                    display = escape_html(&p.display),
                    activity = escape_html(activity),
                    identity = escape_html(&p.identity),
                )
            })
            .collect();
        format!(
            r#"<div class="participants"><h5>Participants</h5><ul style="list-style-type: none; padding: 0;">{rows}</ul></div>"#
        )
    };

    format!(
        concat!(
            "<h4>{name}</h4>",
            "<p>{description}</p>",
            "<p><strong>Schedule:</strong> {schedule}</p>",
            "<p><strong>Availability:</strong> {spots_left} spots left</p>",
            "{roster}"
        ),
        name = escape_html(activity),
        description = escape_html(record.description()),
        schedule = escape_html(record.schedule()),
        spots_left = spots_left,
        roster = roster,
    )
}

/// Everything one render cycle writes: the cards and the select options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogView {
    pub cards: Vec<CardView>,
}

impl CatalogView {
    pub fn build(catalog: &ActivityCatalog) -> Self {
        Self {
            cards: catalog
                .iter()
                .map(|(name, record)| CardView::build(name, record))
                .collect(),
        }
    }

    /// Select option values, excluding the placeholder.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().map(|card| card.activity.as_str())
    }

    pub fn card(&self, activity: &str) -> Option<&CardView> {
        self.cards.iter().find(|card| card.activity == activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog(value: serde_json::Value) -> ActivityCatalog {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn escapes_all_markup_characters() {
        assert_eq!(
            escape_html(r#"<b onclick="x">Tom & 'Jerry'</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn initials_from_identity_keys() {
        assert_eq!(initials("a.b@example.com"), "AB");
        assert_eq!(initials("ab"), "AB");
        assert_eq!(initials(""), "?");
        assert_eq!(initials("a@example.com"), "A");
        assert_eq!(initials("michael@mergington.edu"), "MI");
        assert_eq!(initials("mary-jane_watson@x.com"), "MJ");
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("...@x.com"), ".");
        assert_eq!(initials("@x.com"), "?");
    }

    #[test]
    fn renders_spots_left_and_participant_row() {
        let view = CatalogView::build(&catalog(json!({
            "Chess Club": {
                "description": "d",
                "schedule": "Mon",
                "max_participants": 2,
                "participants": ["a@x.com"]
            }
        })));

        let card = view.card("Chess Club").unwrap();
        assert_eq!(card.spots_left, 1);
        assert!(card.html.contains("1 spots left"));
        assert_eq!(card.participants.len(), 1);
        assert_eq!(card.participants[0].identity, "a@x.com");
        assert_eq!(
            card.removals(),
            vec![RemoveBinding {
                activity: "Chess Club".to_string(),
                identity: "a@x.com".to_string(),
            }]
        );
        assert_eq!(view.options().collect::<Vec<_>>(), ["Chess Club"]);
    }

    #[test]
    fn oversubscribed_activity_shows_negative_spots() {
        let view = CatalogView::build(&catalog(json!({
            "Gym": {"max_participants": 1, "participants": ["a", "b", "c"]}
        })));
        assert!(view.cards[0].html.contains("-2 spots left"));
    }

    #[test]
    fn empty_roster_renders_placeholder() {
        let view = CatalogView::build(&catalog(json!({"Art": {"max_participants": 5}})));
        let html = &view.cards[0].html;
        assert!(html.contains("No participants yet"));
        assert!(html.contains("<strong>Schedule:</strong> TBD"));
        assert!(!html.contains("delete-btn"));
    }

    #[test]
    fn untrusted_values_never_reach_markup_raw() {
        let view = CatalogView::build(&catalog(json!({
            "<script>alert(1)</script>": {
                "description": "<img src=x onerror=alert(1)>",
                "schedule": "Tue & Thu \"late\"",
                "max_participants": 3,
                "participants": [{"name": "<i>Eve</i>", "email": "eve'@x.com"}]
            }
        })));
        let html = &view.cards[0].html;
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("<i>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Tue &amp; Thu &quot;late&quot;"));
        assert!(html.contains("&lt;i&gt;Eve&lt;/i&gt;"));
        assert!(html.contains(r#"data-email="eve&#39;@x.com""#));
    }
}
