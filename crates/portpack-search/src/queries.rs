//! Per-source query templates built from a [`ProjectProfile`].

use portpack_core::profile::join_terms;
use portpack_core::{InstagramMode, ProjectProfile, SourceKind};

use crate::types::{SearchMode, SourceQuery};

const INSTAGRAM_POSTS: &str = "site:instagram.com (inurl:/p/ OR inurl:/reel/)";

/// Default base query: the profile's identifying terms plus `runway backstage`.
#[must_use]
pub fn auto_query(profile: &ProjectProfile) -> String {
    let year = profile.year.to_string();
    join_terms(&[
        profile.brand.as_str(),
        profile.season.as_str(),
        year.as_str(),
        profile.location.as_str(),
        profile.keywords.as_str(),
        "runway backstage",
    ])
}

/// Builds the ordered list of source queries for `profile`.
///
/// Web sources come first (Vogue, `VogueRunway`, brand site), each gated by its
/// toggle; Instagram is appended last when that source is enabled.
#[must_use]
pub fn build_queries(profile: &ProjectProfile, base_query: &str) -> Vec<SourceQuery> {
    let mut queries = Vec::new();

    if profile.includes(SourceKind::Web) {
        if profile.use_vogue {
            queries.push(SourceQuery::new(
                "Vogue.com",
                SearchMode::Images,
                join_terms(&["site:vogue.com/fashion-shows", base_query]),
            ));
        }
        if profile.use_voguerunway {
            queries.push(SourceQuery::new(
                "VogueRunway.com",
                SearchMode::Images,
                join_terms(&["site:voguerunway.com", base_query]),
            ));
        }
        if profile.use_brand_site {
            queries.push(brand_site_query(profile.brand_domain.trim(), base_query));
        }
    }

    if profile.includes(SourceKind::Instagram) {
        queries.push(SourceQuery::new(
            "Instagram",
            SearchMode::Web,
            instagram_query(&profile.ig_handle, profile.ig_mode, base_query),
        ));
    }

    queries
}

fn brand_site_query(domain: &str, base_query: &str) -> SourceQuery {
    if domain.is_empty() {
        SourceQuery::new(
            "Brand site (web)",
            SearchMode::Images,
            join_terms(&[
                base_query,
                "official site lookbook press runway",
                "-site:pinterest.com",
                "-site:tiktok.com",
            ]),
        )
    } else {
        let site = format!("site:{domain}");
        SourceQuery::new(
            "Brand site",
            SearchMode::Images,
            join_terms(&[&site, base_query, "lookbook press runway"]),
        )
    }
}

fn instagram_query(handle: &str, mode: InstagramMode, base_query: &str) -> String {
    let handle = handle.trim().trim_start_matches('@');
    let quoted = if handle.is_empty() {
        String::new()
    } else {
        format!("\"{handle}\"")
    };

    match mode {
        InstagramMode::HandleOnly if quoted.is_empty() => {
            join_terms(&[INSTAGRAM_POSTS, base_query])
        }
        InstagramMode::HandleOnly => join_terms(&[INSTAGRAM_POSTS, &quoted]),
        InstagramMode::HandleAndShowTerms => join_terms(&[INSTAGRAM_POSTS, &quoted, base_query]),
        InstagramMode::ShowTermsOnly => join_terms(&[INSTAGRAM_POSTS, base_query]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web_profile() -> ProjectProfile {
        ProjectProfile {
            sources: vec![SourceKind::Web],
            ..ProjectProfile::sample()
        }
    }

    #[test]
    fn auto_query_normalizes_terms() {
        let profile = ProjectProfile {
            brand: "  Jean Paul  Gaultier ".to_string(),
            season: "Couture".to_string(),
            year: 2025,
            location: "Paris".to_string(),
            keywords: "backstage, hair,,beauty".to_string(),
            ..ProjectProfile::default()
        };
        assert_eq!(
            auto_query(&profile),
            "Jean Paul Gaultier Couture 2025 Paris backstage hair beauty runway backstage"
        );
    }

    #[test]
    fn web_sources_are_ordered_and_image_mode() {
        let profile = ProjectProfile {
            brand_domain: "jeanpaulgaultier.com".to_string(),
            ..web_profile()
        };
        let queries = build_queries(&profile, "jpg couture");
        let names: Vec<&str> = queries.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, ["Vogue.com", "VogueRunway.com", "Brand site"]);
        assert!(queries.iter().all(|q| q.mode == SearchMode::Images));
        assert_eq!(queries[0].query, "site:vogue.com/fashion-shows jpg couture");
        assert_eq!(queries[1].query, "site:voguerunway.com jpg couture");
        assert_eq!(
            queries[2].query,
            "site:jeanpaulgaultier.com jpg couture lookbook press runway"
        );
    }

    #[test]
    fn brand_site_without_domain_uses_web_template() {
        let profile = ProjectProfile {
            brand_domain: "  ".to_string(),
            use_vogue: false,
            use_voguerunway: false,
            ..web_profile()
        };
        let queries = build_queries(&profile, "jpg");
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].name, "Brand site (web)");
        assert_eq!(
            queries[0].query,
            "jpg official site lookbook press runway -site:pinterest.com -site:tiktok.com"
        );
    }

    #[test]
    fn disabled_toggles_drop_sources() {
        let profile = ProjectProfile {
            use_vogue: false,
            use_voguerunway: false,
            use_brand_site: false,
            ..web_profile()
        };
        assert!(build_queries(&profile, "jpg").is_empty());
    }

    #[test]
    fn instagram_modes() {
        let base = ProjectProfile {
            sources: vec![SourceKind::Instagram],
            ig_handle: "@jeanpaulgaultier".to_string(),
            ..ProjectProfile::default()
        };

        let both = build_queries(&base, "couture");
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].name, "Instagram");
        assert_eq!(both[0].mode, SearchMode::Web);
        assert_eq!(
            both[0].query,
            "site:instagram.com (inurl:/p/ OR inurl:/reel/) \"jeanpaulgaultier\" couture"
        );

        let handle_only = ProjectProfile {
            ig_mode: InstagramMode::HandleOnly,
            ..base.clone()
        };
        assert_eq!(
            build_queries(&handle_only, "couture")[0].query,
            "site:instagram.com (inurl:/p/ OR inurl:/reel/) \"jeanpaulgaultier\""
        );

        let terms_only = ProjectProfile {
            ig_mode: InstagramMode::ShowTermsOnly,
            ..base.clone()
        };
        assert_eq!(
            build_queries(&terms_only, "couture")[0].query,
            "site:instagram.com (inurl:/p/ OR inurl:/reel/) couture"
        );
    }

    #[test]
    fn handle_only_without_handle_uses_base_query() {
        let profile = ProjectProfile {
            sources: vec![SourceKind::Instagram],
            ig_handle: String::new(),
            ig_mode: InstagramMode::HandleOnly,
            ..ProjectProfile::default()
        };
        assert_eq!(
            build_queries(&profile, "couture")[0].query,
            "site:instagram.com (inurl:/p/ OR inurl:/reel/) couture"
        );
    }

    #[test]
    fn instagram_follows_web_sources() {
        let profile = ProjectProfile {
            sources: vec![SourceKind::Instagram, SourceKind::Web],
            ..ProjectProfile::sample()
        };
        let queries = build_queries(&profile, "jpg");
        assert_eq!(queries.last().map(|q| q.name.as_str()), Some("Instagram"));
    }
}
