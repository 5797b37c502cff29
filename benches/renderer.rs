use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wlformat::config::Config;
use wlformat::layout::compute_workflow_layout;
use wlformat::model::{
    DefinitionStore, ElementDefinition, NodeDef, PortDef, WorkflowDef, WorkflowLink, WorkflowNode,
};
use wlformat::render::{export_workflow_with_config, render_svg};

fn port(name: String) -> PortDef {
    PortDef {
        name,
        interface: "any".to_string(),
        default: String::new(),
        description: String::new(),
    }
}

fn store(ports: usize) -> DefinitionStore {
    let def = NodeDef {
        id: "node_bench".to_string(),
        name: "bench node".to_string(),
        description: String::new(),
        owner: "bench".to_string(),
        version: 0,
        function: "bench:run".to_string(),
        url: None,
        inputs: (0..ports).map(|i| port(format!("in {i}"))).collect(),
        outputs: (0..ports).map(|i| port(format!("out({i})"))).collect(),
    };
    vec![ElementDefinition::Node(def)].into()
}

/// Grid of `nodes` nodes, each wired to the next row on every port.
fn grid_workflow(nodes: usize, ports: usize) -> WorkflowDef {
    let columns = (nodes as f64).sqrt().ceil().max(1.0) as usize;
    let mut wkf = WorkflowDef {
        id: "wkf_bench".to_string(),
        ..Default::default()
    };
    for i in 0..nodes {
        let id = if i % 7 == 0 { "node_missing" } else { "node_bench" };
        let x = (i % columns) as f64 * 160.0;
        let y = (i / columns) as f64 * 90.0;
        wkf.nodes.push(WorkflowNode::at(id, x, y));
    }
    for i in 0..nodes.saturating_sub(columns) {
        for p in 0..ports {
            wkf.links.push(WorkflowLink::new(
                i,
                format!("out({p})"),
                i + columns,
                format!("in {p}"),
            ));
        }
    }
    wkf
}

const SIZES: [(usize, usize); 4] = [(10, 2), (100, 3), (400, 4), (1000, 2)];

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = Config::default();
    for (nodes, ports) in SIZES {
        let store = store(ports);
        let wkf = grid_workflow(nodes, ports);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("grid_{nodes}_{ports}")),
            &wkf,
            |b, wkf| {
                b.iter(|| {
                    let layout =
                        compute_workflow_layout(black_box(wkf), &store, &config).expect("layout");
                    black_box(layout.nodes.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let config = Config::default();
    for (nodes, ports) in SIZES {
        let store = store(ports);
        let wkf = grid_workflow(nodes, ports);
        let layout = compute_workflow_layout(&wkf, &store, &config).expect("layout");
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("grid_{nodes}_{ports}")),
            &layout,
            |b, layout| {
                b.iter(|| {
                    let svg = render_svg(black_box(layout), &config.theme, &config.layout);
                    black_box(svg.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let config = Config::default().with_size(1024, 768);
    for (nodes, ports) in SIZES {
        let store = store(ports);
        let wkf = grid_workflow(nodes, ports);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("grid_{nodes}_{ports}")),
            &wkf,
            |b, wkf| {
                b.iter(|| {
                    let (svg, viewport) =
                        export_workflow_with_config(black_box(wkf), &store, &config)
                            .expect("render");
                    black_box((svg.len(), viewport));
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_render, bench_end_to_end);
criterion_main!(benches);
