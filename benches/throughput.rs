//! Throughput Benchmark for CalcWire
//!
//! This benchmark measures the synchronous stages of the request
//! pipeline: parsing, evaluation, and response serialization.

use calcwire::commands::CommandHandler;
use calcwire::protocol::{Command, RequestParser, Response};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

/// Benchmark request parsing
fn bench_parse(c: &mut Criterion) {
    let parser = RequestParser::new();

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(1));

    group.bench_function("parse_minimal", |b| {
        let request = b"GET / HTTP/1.0\r\n\r\nfactorial 5";
        b.iter(|| black_box(parser.parse(black_box(request))));
    });

    group.bench_function("parse_with_headers", |b| {
        let request = b"POST / HTTP/1.1\r\n\
                        Host: 127.0.0.1:8080\r\n\
                        User-Agent: curl/8.5.0\r\n\
                        Accept: */*\r\n\
                        Content-Length: 21\r\n\
                        Content-Type: application/x-www-form-urlencoded\r\n\
                        \r\n\
                        abs 5,87,2,5,1,4,67,6";
        b.iter(|| black_box(parser.parse(black_box(request))));
    });

    group.bench_function("parse_many_parameters", |b| {
        let params: Vec<String> = (0..64).map(|i| i.to_string()).collect();
        let request = format!("GET / HTTP/1.0\r\n\r\nabs {}", params.join(","));
        let request = request.as_bytes();
        b.iter(|| black_box(parser.parse(black_box(request))));
    });

    group.finish();
}

/// Benchmark command evaluation
fn bench_evaluate(c: &mut Criterion) {
    let handler = CommandHandler::new();

    let mut group = c.benchmark_group("evaluate");
    group.throughput(Throughput::Elements(1));

    group.bench_function("factorial_20", |b| {
        let cmd = Command::new("factorial", vec![20.0]);
        b.iter(|| black_box(handler.execute(black_box(&cmd))));
    });

    group.bench_function("fibonacci_50", |b| {
        let cmd = Command::new("fibonacci", vec![50.0]);
        b.iter(|| black_box(handler.execute(black_box(&cmd))));
    });

    group.bench_function("pow", |b| {
        let cmd = Command::new("pow", vec![2.0, 10.0]);
        b.iter(|| black_box(handler.execute(black_box(&cmd))));
    });

    group.bench_function("mean_64", |b| {
        let cmd = Command::new("abs", (0..64).map(|i| i as f64).collect());
        b.iter(|| black_box(handler.execute(black_box(&cmd))));
    });

    group.finish();
}

/// Benchmark response serialization
fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    group.throughput(Throughput::Elements(1));

    group.bench_function("ok_response", |b| {
        let response = Response::ok(22.125);
        b.iter(|| black_box(response.serialize()));
    });

    group.bench_function("error_response", |b| {
        let response = Response::bad_request("Wrong parameters");
        b.iter(|| black_box(response.serialize()));
    });

    group.bench_function("serialize_into_reused_buffer", |b| {
        let response = Response::ok(22.125);
        let mut buf = Vec::with_capacity(256);
        b.iter(|| {
            buf.clear();
            response.serialize_into(&mut buf);
            black_box(buf.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_evaluate, bench_serialize);

criterion_main!(benches);
