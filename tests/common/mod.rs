use investor_pdf_api::{create_router, AppState, Company, CompanyRegistry, HttpSource};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

/// Registry with every company pointed at the mock server's listing page
/// and loopback hosts allow-listed.
pub fn test_registry(results_url: &str) -> CompanyRegistry {
    let results_urls = HashMap::from([
        (Company::Hays, results_url.to_string()),
        (Company::Pagegroup, results_url.to_string()),
        (Company::Robertwalters, results_url.to_string()),
    ]);
    let allowed_hosts = HashSet::from(["127.0.0.1".to_string(), "localhost".to_string()]);
    CompanyRegistry::new(results_urls, allowed_hosts)
}

/// Serve the real router on an ephemeral port; returns its base URL.
pub async fn spawn_app(registry: CompanyRegistry) -> String {
    let source = HttpSource::new(Duration::from_secs(5)).unwrap();
    let state = AppState::new(Arc::new(source), registry);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Build a PDF where each element of `pages` is a list of `(x, y, text)`
/// show operations.
pub fn build_pdf(pages: &[Vec<(i64, i64, &str)>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 11.into()]),
        ];
        let mut cur = (0_i64, 0_i64);
        for &(x, y, text) in lines {
            operations.push(Operation::new(
                "Td",
                vec![(x - cur.0).into(), (y - cur.1).into()],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
            cur = (x, y);
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
