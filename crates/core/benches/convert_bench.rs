//! Benchmarks for schema conversion
//!
//! Run with: cargo bench -p avrobridge-core

use avrobridge_core::json_schema::{JsonSchemaOptions, json_schema_to_avro};
use avrobridge_core::{GraphqlGenerator, PydanticGenerator, parse_schema};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::{Map, Value, json};

/// Generate an Avro record with a mix of field types
fn generate_avro_schema(field_count: usize) -> Value {
    let fields: Vec<Value> = (0..field_count)
        .map(|i| match i % 6 {
            0 => json!({"name": format!("name_{}", i), "type": "string"}),
            1 => json!({"name": format!("count_{}", i), "type": "int", "default": 0}),
            2 => json!({"name": format!("tags_{}", i), "type": {"type": "array", "items": "string"}}),
            3 => json!({"name": format!("attrs_{}", i), "type": {"type": "map", "values": "long"}}),
            4 => json!({"name": format!("maybe_{}", i), "type": ["null", "double"], "default": null}),
            _ => json!({
                "name": format!("nested_{}", i),
                "type": {
                    "type": "record",
                    "name": format!("Nested{}", i),
                    "fields": [
                        {"name": "id", "type": {"type": "string", "logicalType": "uuid"}},
                        {"name": "status", "type": {"type": "enum", "name": format!("Status{}", i), "symbols": ["Active", "Retired"]}}
                    ]
                }
            }),
        })
        .collect();

    json!({"type": "record", "name": "Bench", "namespace": "bench", "fields": fields})
}

/// Generate a pydantic-style JSON Schema with shared definitions
fn generate_json_schema(property_count: usize) -> Value {
    let mut properties = Map::new();
    for i in 0..property_count {
        let spec = match i % 4 {
            0 => json!({"type": "string"}),
            1 => json!({"anyOf": [{"type": "integer"}, {"type": "null"}], "default": null}),
            2 => json!({"type": "array", "items": {"$ref": "#/$defs/Item"}}),
            _ => json!({"type": "string", "format": "date-time"}),
        };
        properties.insert(format!("p{}", i), spec);
    }

    json!({
        "title": "Bench",
        "type": "object",
        "properties": properties,
        "$defs": {
            "Item": {
                "title": "Item",
                "type": "object",
                "properties": {"label": {"type": "string"}},
                "required": ["label"]
            }
        }
    })
}

fn bench_avro_codegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("avro_codegen");

    for count in [10, 100, 500].iter() {
        let schema = generate_avro_schema(*count);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("parse", count), &schema, |b, schema| {
            b.iter(|| black_box(parse_schema(schema)));
        });

        let parsed = match parse_schema(&schema) {
            Ok(parsed) => parsed,
            Err(e) => panic!("benchmark schema is invalid: {}", e),
        };

        let pydantic = PydanticGenerator::default();
        group.bench_with_input(BenchmarkId::new("pydantic", count), &parsed, |b, parsed| {
            b.iter(|| black_box(pydantic.generate(parsed)));
        });

        let graphql = GraphqlGenerator::default();
        group.bench_with_input(BenchmarkId::new("graphql", count), &parsed, |b, parsed| {
            b.iter(|| black_box(graphql.generate(parsed)));
        });
    }

    group.finish();
}

fn bench_json_schema_to_avro(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_schema_to_avro");
    let options = JsonSchemaOptions::new();

    for count in [10, 100, 500].iter() {
        let schema = generate_json_schema(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("convert", count), &schema, |b, schema| {
            b.iter(|| black_box(json_schema_to_avro(schema, &options)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_avro_codegen, bench_json_schema_to_avro);
criterion_main!(benches);
