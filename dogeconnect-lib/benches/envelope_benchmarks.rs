//! Envelope and amount benchmarks
//!
//! These benchmarks measure the operations a wallet runs between scanning a
//! QR code and showing a payment request.
//!
//! Run with: `cargo bench --bench envelope_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use dogeconnect_lib::keyhash::pub_key_hash;
use dogeconnect_lib::protocol::{ConnectItem, ConnectOutput, ConnectPayment, ItemType};
use dogeconnect_lib::{
    dogecoin_uri, parse_dogecoin_uri, parse_koinu, payload_digest, sign_payment_request,
    verify_payment_request, Bip340, SignatureScheme,
};

fn bench_payment() -> ConnectPayment {
    let cost = parse_koinu("414.37965").unwrap();
    let fee = parse_koinu("6.31035").unwrap();
    ConnectPayment::new("101", "2025-02-19T14:07:20+11:00", 30)
        .with_gateway("https://example.com/dc/1QAB-POvTh2R88nybE8Wwg")
        .with_vendor("Example Co", "https://static.example.com/vnd/1234/icon.png", "123 Example St")
        .with_totals(parse_koinu("420.69").unwrap(), fee, parse_koinu("0").unwrap())
        .with_item(ConnectItem::new(ItemType::Item, "123", "Good Item", 1, cost).unwrap())
        .with_output(ConnectOutput::new("DPD7uK4B1kRmbfGmytBhG1DZjaMWNfbpwY", cost))
        .with_output(ConnectOutput::new("DTG6vtXMfmjsitw4JkjJKb5SXH1hcNxn3n", fee))
}

/// Benchmark decimal amount parsing
fn bench_parse_koinu(c: &mut Criterion) {
    c.bench_function("parse_koinu", |b| {
        b.iter(|| {
            let value = parse_koinu(black_box("9999999999.99999999"));
            black_box(value)
        })
    });
}

/// Benchmark Connect URI encode and parse
fn bench_connect_uri(c: &mut Criterion) {
    let pub_key = [7u8; 32];
    let uri = dogecoin_uri(
        "DPD7uK4B1kRmbfGmytBhG1DZjaMWNfbpwY",
        "12.25",
        "https://example.com/dc/1QAB-POvTh2R88nybE8Wwg",
        &pub_key,
    );

    c.bench_function("dogecoin_uri_encode", |b| {
        b.iter(|| {
            black_box(dogecoin_uri(
                "DPD7uK4B1kRmbfGmytBhG1DZjaMWNfbpwY",
                "12.25",
                black_box("https://example.com/dc/1QAB-POvTh2R88nybE8Wwg"),
                &pub_key,
            ))
        })
    });

    c.bench_function("dogecoin_uri_parse", |b| {
        b.iter(|| black_box(parse_dogecoin_uri(black_box(&uri))))
    });
}

/// Benchmark the double-SHA256 payload digest
fn bench_payload_digest(c: &mut Criterion) {
    let payload = serde_json::to_vec(&bench_payment()).unwrap();

    let mut group = c.benchmark_group("payload_digest");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("double_sha256", |b| {
        b.iter(|| black_box(payload_digest(black_box(&payload))))
    });
    group.finish();
}

/// Benchmark envelope signing (gateway side)
fn bench_sign(c: &mut Criterion) {
    let key = Bip340::generate_signing_key();
    let payment = bench_payment();

    c.bench_function("sign_payment_request", |b| {
        b.iter(|| black_box(sign_payment_request(black_box(&payment), &key)))
    });
}

/// Benchmark envelope verification (wallet side)
fn bench_verify(c: &mut Criterion) {
    let key = Bip340::generate_signing_key();
    let hash = pub_key_hash(&Bip340.public_key(&key).unwrap());
    let envelope = sign_payment_request(&bench_payment(), &key).unwrap();

    c.bench_function("verify_payment_request", |b| {
        b.iter(|| black_box(verify_payment_request(black_box(&envelope), &hash)))
    });
}

criterion_group!(
    benches,
    bench_parse_koinu,
    bench_connect_uri,
    bench_payload_digest,
    bench_sign,
    bench_verify,
);
criterion_main!(benches);
