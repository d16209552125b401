use crate::types::{ItemRoast, NamedItem, RoastCard};

/// Matches every roast back to the item it talks about.
///
/// A roast belongs to the first item (in `items` order) whose name contains
/// the roast's name or is contained in it. Unmatched roasts get an empty
/// image. The output follows the order of `roasts`.
pub fn reconcile(items: &[NamedItem], roasts: &[ItemRoast]) -> Vec<RoastCard> {
    roasts
        .iter()
        .map(|roast| {
            let image = items
                .iter()
                .find(|item| item.name.contains(&roast.name) || roast.name.contains(&item.name))
                .and_then(|item| item.image_url.clone())
                .unwrap_or_default();

            RoastCard {
                name: roast.name.clone(),
                roast: roast.roast.clone(),
                image,
            }
        })
        .collect()
}
