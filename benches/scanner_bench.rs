// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use clientsideeye::{parse_html, DomScanner, FindHints, HtmlAnalyzer, ScanConfig};

fn admin_page(rows: usize) -> String {
    let mut body = String::new();
    for i in 0..rows {
        body.push_str(&format!(
            r#"<tr>
                <td>user{i}</td>
                <td><button id="delete-{i}" class="btn btn-danger disabled" disabled>Delete</button></td>
                <td><a href="/admin/users/{i}/export" style="display:none">Export</a></td>
                <td><span role="button" aria-disabled="true">Approve</span></td>
            </tr>"#
        ));
    }
    format!(
        r#"<!DOCTYPE html>
        <html>
        <head><title>Admin</title><style>.locked {{ visibility: hidden }}</style></head>
        <body>
            <form action="/admin/save" method="post">
                <input type="password" name="pw" value="hunter2">
                <div class="locked"><input type="submit" value="Save settings"></div>
            </form>
            <table>{body}</table>
            <script>setInterval(function() {{ debugger; }}, 100);</script>
        </body>
        </html>"#
    )
}

fn dom_scan_benchmark(c: &mut Criterion) {
    let html = admin_page(40);
    let scanner = DomScanner::new(ScanConfig::default());

    c.bench_function("parse_html", |b| {
        b.iter(|| black_box(parse_html(black_box(&html)).unwrap()))
    });

    let doc = parse_html(&html).unwrap();
    c.bench_function("dom_scan", |b| b.iter(|| black_box(scanner.scan(&doc))));
}

fn analyzer_benchmark(c: &mut Criterion) {
    let html = admin_page(40);
    let analyzer = HtmlAnalyzer::new();

    c.bench_function("html_analyze", |b| {
        b.iter(|| black_box(analyzer.analyze("https://app.test/admin", black_box(&html))))
    });
}

fn hints_benchmark(c: &mut Criterion) {
    let evidence = r#"<button id="delete-7" class="btn btn-danger disabled" data-testid="del" disabled>Delete user</button>"#;

    c.bench_function("find_hints", |b| {
        b.iter(|| black_box(FindHints::build(black_box(evidence))))
    });
}

criterion_group!(benches, dom_scan_benchmark, analyzer_benchmark, hints_benchmark);
criterion_main!(benches);
