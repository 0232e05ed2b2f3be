use std::collections::HashMap;
use std::error::Error as _;
use std::io::Write;
use std::sync::Arc;

use http::header::LINK;
use serde_json::{json, Value};
use tera::{Context, Tera};
use tera_web_helpers::{Extension, JsonConfig, Router, Services};

struct TestRouter;

impl Router for TestRouter {
    fn generate(&self, name: &str, params: &HashMap<String, Value>) -> Option<String> {
        match name {
            "home" => Some("/".to_string()),
            "article.show" => {
                let slug = params.get("slug")?.as_str()?.to_string();
                Some(format!("/articles/{}", slug))
            }
            _ => None,
        }
    }
}

fn write_manifest() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"js/app.js": "js/app.def456.js", "css/app.css": "css/app.abc123.css"}"#)
        .unwrap();
    file
}

fn services(manifest: &tempfile::NamedTempFile) -> Services {
    let config = JsonConfig::new(json!({
        "templates": {
            "options": {
                "manifest": manifest.path().to_str().unwrap(),
                "asset_prefix": "/assets/",
            }
        }
    }));
    Services::new(Arc::new(TestRouter), Arc::new(config))
}

fn render_one(template: &str, context: &Context) -> (tera::Result<String>, Extension) {
    let manifest = write_manifest();
    let extension = Extension::new(services(&manifest));
    let mut tera = Tera::default();
    extension.register(&mut tera);
    tera.add_raw_template("test.txt", template).unwrap();
    (tera.render("test.txt", context), extension)
}

#[test]
fn path_resolves_named_routes() {
    let (result, _) = render_one(
        r#"{{ path(name="home") }} {{ path(name="article.show", slug="intro") }}"#,
        &Context::new(),
    );
    assert_eq!(result.unwrap(), "/ /articles/intro");
}

#[test]
fn path_unknown_route_fails_the_render() {
    let (result, _) = render_one(r#"{{ path(name="missing") }}"#, &Context::new());
    let err = result.unwrap_err();
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        chain.push_str(&inner.to_string());
        source = inner.source();
    }
    assert!(chain.contains("no route found for name `missing`"), "{}", chain);
}

#[test]
fn asset_returns_prefixed_paths_and_empty_for_unknown_keys() {
    let (result, _) = render_one(
        r#"[{{ asset(key="js/app.js") }}][{{ asset(key="img/logo.png") }}]"#,
        &Context::new(),
    );
    assert_eq!(result.unwrap(), "[/assets/js/app.def456.js][]");
}

#[test]
fn preload_pushes_each_link_once() {
    let template = "{{ preload(link=\"/css/app.css\") }}\n{{ preload(link=\"/css/app.css\") }}";
    let (result, extension) = render_one(template, &Context::new());
    assert_eq!(result.unwrap(), "/css/app.css\n/css/app.css");

    let cache = extension.push_cache();
    let headers = cache.headers();
    let links: Vec<_> =
        headers.get_all(LINK).iter().map(|v| v.to_str().unwrap().to_string()).collect();
    assert_eq!(
        links,
        vec!["</css/app.css>; rel=preload", "</css/app.css>; rel=preload; nopush"]
    );

    let cookies = cache.cookies();
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name(), "h2pushes");
}

#[test]
fn preload_cookie_carries_over_to_the_next_request() {
    let manifest = write_manifest();

    let first = Extension::new(services(&manifest));
    let mut tera = Tera::default();
    first.register(&mut tera);
    tera.add_raw_template("page.txt", r#"{{ preload(link="/js/app.js") }}"#).unwrap();
    tera.render("page.txt", &Context::new()).unwrap();
    let cookie = first.push_cache().cookies().pop().unwrap().encoded().to_string();

    let second = Extension::from_request(services(&manifest), Some(&cookie));
    let mut tera = Tera::default();
    second.register(&mut tera);
    tera.add_raw_template("page.txt", r#"{{ preload(link="/js/app.js") }}"#).unwrap();
    tera.render("page.txt", &Context::new()).unwrap();

    let headers = second.push_cache().headers();
    assert_eq!(headers.get(LINK).unwrap().to_str().unwrap(), "</js/app.js>; rel=preload; nopush");
    // nothing new pushed, nothing to persist
    assert!(second.push_cache().cookies().is_empty());
}

#[test]
fn formatting_filters_are_registered() {
    let mut context = Context::new();
    context.insert("html", "<div>\n  <p>some   text</p>\n</div>");
    context.insert("notes", "first\nsecond\n\nthird");
    context.insert("published", &1482720453);
    context.insert("size", &123456789);
    context.insert("payload", r#"{"tags": ["a", "b"]}"#);

    let template = "{{ html | spaceless }}\n\
                    {{ notes | nl2p }}\n\
                    {{ published | date_format(format=\"%Y-%m-%d\") }}\n\
                    {{ size | human_file_size }}\n\
                    {% set data = payload | json_decode %}{{ data.tags | length }}\n\
                    {{ \"hello world\" | truncate(length=5, end=\"...\") }}";
    let (result, _) = render_one(template, &context);
    assert_eq!(
        result.unwrap(),
        "<div><p>some   text</p></div>\n\
         <p>first<br />second</p>\n<p>third</p>\n\
         2016-12-26\n\
         117.74 MB\n\
         2\n\
         hello..."
    );
}

#[test]
fn instance_of_tester_is_registered() {
    let mut context = Context::new();
    context.insert("event", &json!({"type": "PageView", "path": "/"}));

    let template = "{% if event is instance_of(\"pageview\") %}tracked{% else %}ignored{% endif %}";
    let (result, _) = render_one(template, &context);
    assert_eq!(result.unwrap(), "tracked");
}
