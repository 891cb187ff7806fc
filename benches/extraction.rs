//! Benchmarks for the page extraction pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use pagegist::{FormatOptions, chunk_text, extract_context, format_context, parse_html};

const BASE: &str = "https://shop.example/";

/// Build a synthetic catalog page with a repeating element mix: headings,
/// paragraphs with inline links, product cards with buttons, and one form.
fn sample_page(cards: usize) -> String {
    let mut html = String::with_capacity(cards * 400);
    html.push_str(
        "<html><head><title>Catalog</title></head><body>\
         <nav role=\"navigation\">\
         <a href=\"/home\">Home</a> <a href=\"/deals\">Deals</a>\
         </nav>\
         <main><h1>Product Catalog</h1>\
         <form id=\"filter\" action=\"/search\" method=\"get\">\
         <input type=\"text\" name=\"q\" placeholder=\"Filter products\">\
         <select name=\"sort\" aria-label=\"Sort order\">\
         <option value=\"price\">Price</option>\
         <option value=\"name\" selected>Name</option>\
         </select>\
         <button type=\"submit\">Apply</button>\
         </form>",
    );
    for i in 0..cards {
        html.push_str(&format!(
            "<section class=\"card\"><h2>Product {i}</h2>\
             <p>A fine product, see <a href=\"/item/{i}\">details</a> here.</p>\
             <button aria-label=\"Add product {i}\">Add to cart</button>\
             </section>"
        ));
    }
    html.push_str(
        "</main>\
         <div style=\"display:none\">tracking scaffold</div>\
         <script>init();</script>\
         </body></html>",
    );
    html
}

// ============================================================================
// Pipeline Benchmarks
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let html = sample_page(200);

    c.bench_function("parse_html", |b| {
        b.iter(|| parse_html(&html));
    });
}

fn bench_extract(c: &mut Criterion) {
    let html = sample_page(200);

    c.bench_function("extract_context", |b| {
        b.iter(|| extract_context(&html, BASE));
    });
}

fn bench_format(c: &mut Criterion) {
    let html = sample_page(200);
    let context = extract_context(&html, BASE);

    c.bench_function("format_context", |b| {
        b.iter(|| format_context(&context, &FormatOptions::default()));
    });
}

fn bench_chunk(c: &mut Criterion) {
    let html = sample_page(200);
    let context = extract_context(&html, BASE);
    let text = format_context(&context, &FormatOptions::default());

    c.bench_function("chunk_text", |b| {
        b.iter(|| chunk_text(&text, 2_000));
    });
}

fn bench_end_to_end(c: &mut Criterion) {
    let html = sample_page(200);

    c.bench_function("extract_format_chunk", |b| {
        b.iter(|| {
            let context = extract_context(&html, BASE);
            let text = format_context(&context, &FormatOptions::default());
            chunk_text(&text, 12_000)
        });
    });
}

criterion_group!(
    benches,
    // Stages
    bench_parse,
    bench_extract,
    bench_format,
    bench_chunk,
    // Whole pipeline
    bench_end_to_end,
);
criterion_main!(benches);
