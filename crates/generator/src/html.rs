use citypack_core::{BuildMode, Locale, Site};
use serde::{Deserialize, Serialize};

/// One page to render: a site's template in one locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlTask {
    pub site: Site,
    pub locale: Locale,
    pub template: String,
    pub filename: String,
    /// Chunks injected into the page; only the page's own site
    pub chunks: Vec<String>,
    pub minify: HtmlMinify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlMinify {
    pub collapse_whitespace: bool,
}

impl HtmlTask {
    pub fn new(mode: BuildMode, site: &Site, locale: &Locale) -> Self {
        let filename = format!("{}/{}/index.html", site.public_dir(), locale);
        HtmlTask {
            site: site.clone(),
            locale: locale.clone(),
            template: format!("./{}", filename),
            filename,
            chunks: vec![site.as_str().to_string()],
            minify: HtmlMinify {
                collapse_whitespace: mode.is_production(),
            },
        }
    }
}

/// Every (site, locale) page, sites outer and locales inner.
///
/// The iterator is lazy and can be cloned to walk the same sequence again.
pub fn html_tasks<'a>(
    mode: BuildMode,
    sites: &'a [Site],
    locales: &'a [Locale],
) -> impl Iterator<Item = HtmlTask> + Clone + 'a {
    sites.iter().flat_map(move |site| {
        locales
            .iter()
            .map(move |locale| HtmlTask::new(mode, site, locale))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites(names: &[&str]) -> Vec<Site> {
        names.iter().copied().map(Site::new).collect()
    }

    fn locales(codes: &[&str]) -> Vec<Locale> {
        codes.iter().copied().map(Locale::new).collect()
    }

    #[test]
    fn test_single_site_production() {
        let sites = sites(&["moscow"]);
        let locales = locales(&["en", "ru"]);
        let tasks: Vec<_> = html_tasks(BuildMode::Production, &sites, &locales).collect();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].filename, "moscow/public/en/index.html");
        assert_eq!(tasks[0].template, "./moscow/public/en/index.html");
        assert_eq!(tasks[1].filename, "moscow/public/ru/index.html");
        for task in &tasks {
            assert_eq!(task.chunks, vec!["moscow".to_string()]);
            assert!(task.minify.collapse_whitespace);
        }
    }

    #[test]
    fn test_development_keeps_whitespace() {
        let sites = sites(&["moscow"]);
        let locales = locales(&["en", "ru"]);
        assert!(
            html_tasks(BuildMode::Development, &sites, &locales)
                .all(|task| !task.minify.collapse_whitespace)
        );
    }

    #[test]
    fn test_cross_product_is_sites_major() {
        let sites = sites(&["moscow", "kazan", "sochi"]);
        let locales = locales(&["en", "ru"]);
        let order: Vec<(String, String)> = html_tasks(BuildMode::Production, &sites, &locales)
            .map(|t| (t.site.to_string(), t.locale.to_string()))
            .collect();

        assert_eq!(order.len(), 6);
        assert_eq!(order[0], ("moscow".to_string(), "en".to_string()));
        assert_eq!(order[1], ("moscow".to_string(), "ru".to_string()));
        assert_eq!(order[2], ("kazan".to_string(), "en".to_string()));
        assert_eq!(order[5], ("sochi".to_string(), "ru".to_string()));
    }

    #[test]
    fn test_each_page_gets_only_its_own_chunk() {
        let sites = sites(&["moscow", "kazan"]);
        let locales = locales(&["en", "ru", "tt"]);
        for task in html_tasks(BuildMode::Production, &sites, &locales) {
            assert_eq!(task.chunks, vec![task.site.to_string()]);
            assert!(task.filename.starts_with(&format!("{}/", task.site)));
        }
    }

    #[test]
    fn test_empty_inputs_produce_no_tasks() {
        let sites_list = sites(&["moscow"]);
        let no_locales: Vec<Locale> = Vec::new();
        assert_eq!(
            html_tasks(BuildMode::Production, &sites_list, &no_locales).count(),
            0
        );
        assert_eq!(
            html_tasks(BuildMode::Production, &[], &locales(&["en"])).count(),
            0
        );
    }

    #[test]
    fn test_sequence_is_restartable() {
        let sites = sites(&["moscow", "kazan"]);
        let locales = locales(&["en", "ru"]);
        let tasks = html_tasks(BuildMode::Development, &sites, &locales);

        let first: Vec<_> = tasks.clone().collect();
        let second: Vec<_> = tasks.collect();
        assert_eq!(first, second);
        assert_eq!(
            first,
            html_tasks(BuildMode::Development, &sites, &locales).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let task = HtmlTask::new(BuildMode::Production, &Site::new("moscow"), &Locale::new("en"));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["minify"]["collapseWhitespace"], true);
        assert_eq!(json["chunks"], serde_json::json!(["moscow"]));
        assert_eq!(json["site"], "moscow");
    }
}
