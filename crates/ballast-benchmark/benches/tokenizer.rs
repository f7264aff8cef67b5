use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};

static SERVICE: &str = r#"
@display {label: "orders"}
isolated service http:Service /orders on ep, new http:Listener(9091) {
    resource function get [string id]() returns json|error {
        return {id, total: 10.5, items: [1, 2, 3]};
    }
}
"#;

static DOCUMENTED: &str = "
# Greets everyone who asks.
# + name - who to greet
public function greet(string name) returns string {
    return string `Hello ${name}`;
}
";

static CANDIDATES: [(&str, &str); 2] = [("service", SERVICE), ("documented_function", DOCUMENTED)];

fn iterate(s: &str) {
    use ballast_syntax::SyntaxKind;
    use ballast_tokenizer::Tokenizer;

    let mut tokenizer = Tokenizer::new(s);

    loop {
        let token = tokenizer.next_token();

        if token.kind == SyntaxKind::EOF {
            break;
        }

        black_box(token);
    }
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    for (name, source) in CANDIDATES {
        let source = source.repeat(32);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, s| b.iter(|| iterate(s)));
    }
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
