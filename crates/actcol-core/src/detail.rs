//! Detail-page view of a brand.
//!
//! The canonical [`Brand`] only promotes name, slug and tagline. The detail
//! page reads many more columns; this module resolves them from
//! [`Brand::columns`] through a fixed alias table and supplies the
//! `"Data missing:{Field}"` placeholders shown when the sheet is incomplete.

use serde::Serialize;

use crate::brand::Brand;

const SITE_NAME: &str = "The Active Collection";

struct FieldMap;

impl FieldMap {
    const BRAND: &'static [&'static str] = &["Brand", "Brand Name", "Name"];
    const REGION: &'static [&'static str] = &["Region"];
    const SHIPPING_LOCATIONS: &'static [&'static str] =
        &["ShippingLocations", "Shipping Locations", "Ships To"];
    const ACTIVITIES: &'static [&'static str] = &["Activities", "Activity"];
    const GENDERS: &'static [&'static str] = &["Genders", "Gender"];
    const PRICE: &'static [&'static str] = &["Price"];
    const VALUES: &'static [&'static str] = &["Values"];
    const FEATURED: &'static [&'static str] = &["Featured"];
    const TAGLINE: &'static [&'static str] = &["Tagline", "Summary", "Tag Line"];
    const DESCRIPTION: &'static [&'static str] = &["Description", "About"];
    const WEBSITE: &'static [&'static str] = &["Website", "Site"];
    const INSTAGRAM: &'static [&'static str] = &["Instagram", "Instagram URL"];
    const YEAR_FOUNDED: &'static [&'static str] = &["YearFounded", "Year Founded", "Founded"];
    const FOUNDER: &'static [&'static str] = &["Founder", "Founders"];
    const COUNTRY_OF_MANUFACTURE: &'static [&'static str] =
        &["CountryOfManufacture", "Country of Manufacture", "Made In"];
    const SIZE_RANGE: &'static [&'static str] = &["SizeRange", "Sizes"];
    const MATERIALS: &'static [&'static str] = &["Materials"];
    const GALLERY_IMAGES: &'static [&'static str] = &["GalleryImages", "Gallery"];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BrandDetail {
    pub brand: String,
    pub slug: String,
    pub region: Option<String>,
    pub shipping_locations: Option<String>,
    pub activities: Option<String>,
    pub genders: Option<String>,
    pub price: Option<String>,
    pub values: Option<String>,
    pub featured: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub year_founded: Option<String>,
    pub founder: Option<String>,
    pub country_of_manufacture: Option<String>,
    pub size_range: Option<String>,
    pub materials: Option<String>,
    pub gallery_images: Vec<String>,
}

/// One row of the "at a glance" panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlanceItem {
    pub label: &'static str,
    pub value: String,
}

/// Returns `value` when it has content, otherwise the missing-data marker
/// for `label`.
#[must_use]
pub fn value_or_missing(value: Option<&str>, label: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => format!("Data missing:{label}"),
    }
}

impl BrandDetail {
    #[must_use]
    pub fn from_brand(brand: &Brand) -> Self {
        let get = |keys: &[&str]| brand.columns.pick_first(keys).map(str::to_string);

        Self {
            brand: get(FieldMap::BRAND).unwrap_or_else(|| brand.name.clone()),
            slug: brand.slug.clone(),
            region: get(FieldMap::REGION),
            shipping_locations: get(FieldMap::SHIPPING_LOCATIONS),
            activities: get(FieldMap::ACTIVITIES),
            genders: get(FieldMap::GENDERS),
            price: get(FieldMap::PRICE),
            values: get(FieldMap::VALUES),
            featured: get(FieldMap::FEATURED),
            tagline: get(FieldMap::TAGLINE).or_else(|| brand.tagline.clone()),
            description: get(FieldMap::DESCRIPTION),
            website: get(FieldMap::WEBSITE),
            instagram: get(FieldMap::INSTAGRAM),
            year_founded: get(FieldMap::YEAR_FOUNDED),
            founder: get(FieldMap::FOUNDER),
            country_of_manufacture: get(FieldMap::COUNTRY_OF_MANUFACTURE),
            size_range: get(FieldMap::SIZE_RANGE),
            materials: get(FieldMap::MATERIALS),
            gallery_images: get(FieldMap::GALLERY_IMAGES)
                .map(|raw| parse_gallery(&raw))
                .unwrap_or_default(),
        }
    }

    /// Name of the first required field that is blank, if any.
    #[must_use]
    pub fn first_missing_required(&self) -> Option<&'static str> {
        [("brand", &self.brand), ("slug", &self.slug)]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
    }

    #[must_use]
    pub fn at_a_glance(&self) -> Vec<GlanceItem> {
        [
            ("Region", &self.region),
            ("Shipping Locations", &self.shipping_locations),
            ("Price", &self.price),
            ("Activities", &self.activities),
            ("Genders", &self.genders),
            ("Size Range", &self.size_range),
            ("Country of Manufacture", &self.country_of_manufacture),
        ]
        .into_iter()
        .map(|(label, value)| GlanceItem {
            label,
            value: value_or_missing(value.as_deref(), label),
        })
        .collect()
    }

    /// Up to three gallery images for the recommended-products strip.
    #[must_use]
    pub fn recommended(&self) -> &[String] {
        &self.gallery_images[..self.gallery_images.len().min(3)]
    }

    #[must_use]
    pub fn page_title(&self) -> String {
        let base = if self.brand.is_empty() {
            &self.slug
        } else {
            &self.brand
        };
        format!("{base} | {SITE_NAME}")
    }

    #[must_use]
    pub fn page_description(&self) -> String {
        value_or_missing(
            self.tagline.as_deref().or(self.description.as_deref()),
            "Description",
        )
    }
}

fn parse_gallery(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AssetConfig;
    use crate::brand::build_brand;
    use crate::sheet::SheetRecord;

    fn detail(pairs: &[(&str, &str)]) -> BrandDetail {
        let record: SheetRecord = pairs.iter().copied().collect();
        let brand = build_brand(&record, &AssetConfig::default()).unwrap();
        BrandDetail::from_brand(&brand)
    }

    #[test]
    fn resolves_aliased_detail_fields() {
        let d = detail(&[
            ("Brand", "Tracksmith"),
            ("Ships To", "US, Canada"),
            ("Year Founded", "2014"),
            ("Made In", "Portugal"),
            ("Sizes", "XS-XXL"),
        ]);
        assert_eq!(d.brand, "Tracksmith");
        assert_eq!(d.slug, "tracksmith");
        assert_eq!(d.shipping_locations.as_deref(), Some("US, Canada"));
        assert_eq!(d.year_founded.as_deref(), Some("2014"));
        assert_eq!(d.country_of_manufacture.as_deref(), Some("Portugal"));
        assert_eq!(d.size_range.as_deref(), Some("XS-XXL"));
        assert!(d.website.is_none());
    }

    #[test]
    fn tagline_falls_back_to_brand_tagline() {
        // "Description" feeds the brand tagline but not the detail tagline aliases.
        let d = detail(&[("Brand Name", "Ciele"), ("Description", "Caps for runners")]);
        assert_eq!(d.tagline.as_deref(), Some("Caps for runners"));
        assert_eq!(d.description.as_deref(), Some("Caps for runners"));
    }

    #[test]
    fn gallery_splits_on_commas_and_newlines() {
        let d = detail(&[
            ("Brand Name", "Satisfy"),
            ("Gallery", "https://cdn/a.jpg, https://cdn/b.jpg\nhttps://cdn/c.jpg,,https://cdn/d.jpg"),
        ]);
        assert_eq!(d.gallery_images.len(), 4);
        assert_eq!(d.gallery_images[1], "https://cdn/b.jpg");
        assert_eq!(d.recommended().len(), 3);
    }

    #[test]
    fn recommended_is_empty_without_gallery() {
        let d = detail(&[("Brand Name", "Janji")]);
        assert!(d.recommended().is_empty());
    }

    #[test]
    fn at_a_glance_marks_missing_values() {
        let d = detail(&[("Brand Name", "Vuori"), ("Price", "$$$"), ("Region", " ")]);
        let glance = d.at_a_glance();
        assert_eq!(glance.len(), 7);
        assert_eq!(glance[0].label, "Region");
        assert_eq!(glance[0].value, "Data missing:Region");
        assert_eq!(glance[2].value, "$$$");
    }

    #[test]
    fn value_or_missing_trims() {
        assert_eq!(value_or_missing(Some("  "), "Website"), "Data missing:Website");
        assert_eq!(value_or_missing(None, "Founder"), "Data missing:Founder");
        assert_eq!(value_or_missing(Some(" Jane "), "Founder"), "Jane");
    }

    #[test]
    fn required_fields_present_for_built_brands() {
        let d = detail(&[("Brand Name", "Bandit")]);
        assert_eq!(d.first_missing_required(), None);
        let blank = BrandDetail {
            brand: "Bandit".to_string(),
            ..BrandDetail::default()
        };
        assert_eq!(blank.first_missing_required(), Some("slug"));
    }

    #[test]
    fn page_metadata() {
        let d = detail(&[("Brand Name", "Path Projects")]);
        assert_eq!(d.page_title(), "Path Projects | The Active Collection");
        assert_eq!(d.page_description(), "Data missing:Description");

        let d = detail(&[("Brand Name", "Path Projects"), ("About", "Shorts")]);
        assert_eq!(d.page_description(), "Shorts");
    }
}
