use std::hint::black_box;

use ballast_inputs::File;
use ballast_parse::parse_module;
use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};

fn benchmark_parser(c: &mut Criterion) {
    let db = salsa::DatabaseImpl::new();
    let files = vec![
        File::new(
            &db,
            "Simple".into(),
            r#"
            import ballerina/http;

            service /hello on new http:Listener(9090) {
                resource function get greeting() returns string {
                    return "Hello, World!";
                }
            }
            "#
            .to_string(),
        ),
        File::new(
            &db,
            "Medium".into(),
            r#"
            import ballerina/http;
            import ballerina/log;

            configurable int port = 9090;

            listener http:Listener ep = new (port);

            type Order record {|
                string id;
                decimal total;
            |};

            # Order store.
            @display {label: "orders"}
            isolated service OrderService /orders on ep {
                private map<Order> orders = {};

                resource function get [string id]() returns Order|http:NotFound {
                    lock {
                        return self.orders[id] ?: http:NOT_FOUND;
                    }
                }
            }

            function logOrder(Order o) {
                log:printInfo("order", id = o.id);
            }
            "#
            .to_string(),
        ),
    ];

    let mut group = c.benchmark_group("Parser Benchmark");

    for file in files {
        let code_length = file.text(&db).len() as u64;
        group.throughput(Throughput::Bytes(code_length));
        group.bench_with_input(
            BenchmarkId::new("parse_module", file.path(&db)),
            &file,
            |b, &file| {
                b.iter(|| {
                    let parse = parse_module(file.text(&db));
                    black_box(parse);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
