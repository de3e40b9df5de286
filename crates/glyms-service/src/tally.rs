//! Vote aggregation over an event's preferences.
//!
//! All winners are deterministic: the highest count wins and ties go to the
//! smallest key (tag name, earliest date, weighted tag name).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use glyms_entity::preference::EventUserPreference;
use glyms_entity::tag::Tag;

/// Winning activity tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagTally {
    pub tag: Tag,
    pub votes: usize,
}

/// Winning date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateTally {
    pub date: NaiveDate,
    pub votes: usize,
}

/// One normalized Google Maps tag and its summed weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedTag {
    pub tag: String,
    pub weight: f64,
}

/// Ranking of the free-text Google Maps tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoogleMapsTally {
    /// Heaviest first.
    pub ranking: Vec<WeightedTag>,
    pub winner: Option<WeightedTag>,
}

fn count_by<K: Ord>(keys: impl IntoIterator<Item = K>) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Highest count wins; on equal counts the smaller `key` wins.
fn pick_winner<T, K: Ord>(
    candidates: impl IntoIterator<Item = (T, usize)>,
    key: impl Fn(&T) -> K,
) -> Option<(T, usize)> {
    candidates.into_iter().fold(None, |best, (item, votes)| match best {
        None => Some((item, votes)),
        Some((current, current_votes)) => {
            if votes > current_votes || (votes == current_votes && key(&item) < key(&current)) {
                Some((item, votes))
            } else {
                Some((current, current_votes))
            }
        }
    })
}

/// The most voted tag, resolved against `tags`. `None` without votes.
pub fn most_voted_tag(preferences: &[EventUserPreference], tags: &[Tag]) -> Option<TagTally> {
    let counts = count_by(preferences.iter().map(|p| p.tag_id));
    let candidates = counts.into_iter().filter_map(|(tag_id, votes)| {
        tags.iter()
            .find(|t| t.id == tag_id)
            .map(|t| (t.clone(), votes))
    });
    pick_winner(candidates, |t| t.name.clone()).map(|(tag, votes)| TagTally { tag, votes })
}

/// The most voted date. `None` without votes.
pub fn most_voted_date(preferences: &[EventUserPreference]) -> Option<DateTally> {
    let counts = count_by(preferences.iter().map(|p| p.preferred_date));
    pick_winner(counts, |d| *d).map(|(date, votes)| DateTally { date, votes })
}

/// Normalize a free-text tag: trimmed and lower-cased.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Sum weights per normalized tag across every preference.
///
/// Empty keys and non-finite weights are skipped.
pub fn google_maps_tally(preferences: &[EventUserPreference]) -> GoogleMapsTally {
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for tags in preferences.iter().filter_map(|p| p.google_maps_tags.as_ref()) {
        for (tag, weight) in tags.0.iter() {
            let key = normalize_tag(tag);
            if key.is_empty() || !weight.is_finite() {
                continue;
            }
            *sums.entry(key).or_insert(0.0) += weight;
        }
    }

    let mut ranking: Vec<WeightedTag> = sums
        .into_iter()
        .map(|(tag, weight)| WeightedTag { tag, weight })
        .collect();
    ranking.sort_by(|a, b| b.weight.total_cmp(&a.weight).then_with(|| a.tag.cmp(&b.tag)));

    let winner = ranking.first().cloned();
    GoogleMapsTally { ranking, winner }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use glyms_entity::preference::GoogleMapsTags;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn tag(name: &str) -> Tag {
        Tag {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    fn pref(tag: &Tag, day: u32, maps: Option<&[(&str, f64)]>) -> EventUserPreference {
        EventUserPreference {
            user_id: Uuid::new_v4(),
            event_id: Uuid::nil(),
            tag_id: tag.id,
            preferred_date: date(day),
            google_maps_tags: maps.map(|pairs| {
                Json(
                    pairs
                        .iter()
                        .map(|(k, v)| (k.to_string(), *v))
                        .collect::<GoogleMapsTags>(),
                )
            }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_votes_no_winner() {
        assert!(most_voted_tag(&[], &[tag("Bowling")]).is_none());
        assert!(most_voted_date(&[]).is_none());
        assert!(google_maps_tally(&[]).winner.is_none());
    }

    #[test]
    fn test_plurality_tag() {
        let bowling = tag("Bowling");
        let hiking = tag("Hiking");
        let prefs = vec![
            pref(&hiking, 1, None),
            pref(&bowling, 1, None),
            pref(&hiking, 2, None),
        ];
        let winner = most_voted_tag(&prefs, &[bowling, hiking.clone()]).unwrap();
        assert_eq!(winner.tag, hiking);
        assert_eq!(winner.votes, 2);
    }

    #[test]
    fn test_tag_tie_goes_to_alphabetical_name() {
        let zumba = tag("Zumba");
        let karaoke = tag("Karaoke");
        let prefs = vec![pref(&zumba, 1, None), pref(&karaoke, 1, None)];
        let winner = most_voted_tag(&prefs, &[zumba, karaoke]).unwrap();
        assert_eq!(winner.tag.name, "Karaoke");
        assert_eq!(winner.votes, 1);
    }

    #[test]
    fn test_date_tie_goes_to_earliest() {
        let t = tag("Museum");
        let prefs = vec![
            pref(&t, 20, None),
            pref(&t, 12, None),
            pref(&t, 20, None),
            pref(&t, 12, None),
            pref(&t, 5, None),
        ];
        let winner = most_voted_date(&prefs).unwrap();
        assert_eq!(winner.date, date(12));
        assert_eq!(winner.votes, 2);
    }

    #[test]
    fn test_google_maps_weights_are_normalized_and_summed() {
        let t = tag("Restaurant");
        let prefs = vec![
            pref(&t, 1, Some(&[("Bowling_Alley", 2.0), ("museum", 1.0)])),
            pref(&t, 1, Some(&[(" bowling_alley ", 1.5), ("Museum", 3.0), ("  ", 9.0)])),
            pref(&t, 1, None),
        ];
        let tally = google_maps_tally(&prefs);
        assert_eq!(
            tally.ranking,
            vec![
                WeightedTag { tag: "museum".into(), weight: 4.0 },
                WeightedTag { tag: "bowling_alley".into(), weight: 3.5 },
            ]
        );
        assert_eq!(tally.winner.unwrap().tag, "museum");
    }

    #[test]
    fn test_google_maps_tie_goes_to_alphabetical() {
        let t = tag("Sport");
        let prefs = vec![pref(&t, 1, Some(&[("park", 1.0), ("gym", 1.0)]))];
        assert_eq!(google_maps_tally(&prefs).winner.unwrap().tag, "gym");
    }
}
