use std::collections::BTreeMap;

use crate::core::shutter::format_shutter_speed_with_unit;
use crate::models::tag::{EXIF_GROUP, EXPOSURE_TIME, SHUTTER_SPEED_VALUE};
use crate::models::{MetadataRecord, MetadataTag, TagCategory, TagGroup, TagValue};

/// Groups `Group:Name` keys for the tag tree, `EXIF` first and the rest by name.
///
/// Keys without a group prefix (`SourceFile`) are left out.
pub fn group_tags(record: &MetadataRecord) -> Vec<TagGroup> {
    let mut groups: BTreeMap<&str, Vec<MetadataTag>> = BTreeMap::new();

    for (key, value) in record.iter() {
        let Some((group, name)) = key.split_once(':') else {
            continue;
        };

        let value = match value.as_f64() {
            Some(seconds) if is_shutter_field(name) && seconds > 0.0 => {
                TagValue::Text(format_shutter_speed_with_unit(seconds))
            }
            _ => TagValue::from(value),
        };

        groups.entry(group).or_default().push(MetadataTag {
            key: key.clone(),
            group: group.to_string(),
            name: name.to_string(),
            display_name: display_name_from_key(name),
            value,
            category: infer_category_from_key(name),
        });
    }

    let mut ordered = Vec::with_capacity(groups.len());
    if let Some(tags) = groups.remove(EXIF_GROUP) {
        ordered.push(TagGroup {
            name: EXIF_GROUP.to_string(),
            tags,
        });
    }
    ordered.extend(groups.into_iter().map(|(name, tags)| TagGroup {
        name: name.to_string(),
        tags,
    }));
    ordered
}

fn is_shutter_field(name: &str) -> bool {
    name == SHUTTER_SPEED_VALUE || name == EXPOSURE_TIME
}

// Checked in order; the first category with a keyword in the lowercased name wins.
const CATEGORY_KEYWORDS: &[(TagCategory, &[&str])] = &[
    (TagCategory::Location, &["gps", "latitude", "longitude"]),
    (TagCategory::DateTime, &["datetime", "offsettime", "timestamp"]),
    (TagCategory::Camera, &["make", "model", "lens", "serial"]),
    (
        TagCategory::Capture,
        &["iso", "aperture", "fnumber", "focal", "shutter", "exposure", "flash"],
    ),
    (
        TagCategory::Image,
        &["pixel", "resolution", "orientation", "colorspace", "width", "height"],
    ),
    (
        TagCategory::Description,
        &["title", "description", "caption", "keyword", "copyright", "artist"],
    ),
    (TagCategory::Software, &["software", "editor", "processing"]),
];

pub fn infer_category_from_key(tag_key: &str) -> TagCategory {
    let key = tag_key.to_ascii_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| key.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(TagCategory::Other)
}

/// `LensSerialNumber` -> `Lens Serial Number`. Runs of capitals stay together
/// (`ISO`, `FNumber` -> `F Number`).
pub fn display_name_from_key(tag_key: &str) -> String {
    let chars: Vec<char> = tag_key.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (index, &ch) in chars.iter().enumerate() {
        if ch == '_' || ch == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        let prev_lower = index > 0 && chars[index - 1].is_ascii_lowercase();
        let next_lower = chars.get(index + 1).is_some_and(|next| next.is_ascii_lowercase());
        let prev_upper = index > 0 && chars[index - 1].is_ascii_uppercase();
        let boundary = ch.is_ascii_uppercase() && (prev_lower || (prev_upper && next_lower));

        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }

    if words.is_empty() {
        return tag_key.to_string();
    }
    words.join(" ")
}
