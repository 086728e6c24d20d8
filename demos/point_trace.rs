//! # Point Tracing Walkthrough
//!
//! **What this example teaches:**
//! - Describing a type's constructors, methods, and properties with the fluent builder
//! - Weaving the description so every invocation routes through interception
//! - Watching the `Entering`/`Exiting` trace lines flow through the `tracing` facade
//!
//! **When to use this pattern:**
//! - Instrumenting a type during development to see every call it receives
//! - Diagnosing which member of a type misbehaves, via unmatched `Entering` lines
//!
//! Run with:
//!
//! ```bash
//! cargo run --example point_trace
//! ```

use std::any::Any;
use std::sync::Arc;

use callscope::prelude::*;

struct Point {
    x: i32,
    y: i32,
}

fn describe_point() -> Result<TypeDescriptor> {
    TypeDescriptor::builder("Point")
        .constructor(|c| {
            c.parameter("x").parameter("y").body(|args| {
                let x = *arg::<i32>(args, 0)?;
                let y = *arg::<i32>(args, 1)?;
                Ok(Box::new(Point { x, y }) as Box<dyn Any>)
            })
        })
        .method("DistanceFromOrigin", |m| {
            m.returns("int").body(|receiver, _| {
                let point = receiver_mut::<Point>(receiver)?;
                let squared = point.x * point.x + point.y * point.y;
                Ok(Some(boxed(f64::from(squared).sqrt() as i32)))
            })
        })
        .property("X", |p| {
            p.value_type("int")
                .getter(|receiver, _| Ok(boxed(receiver_ref::<Point>(receiver)?.x)))
                .setter(|receiver, _, value| {
                    receiver_mut::<Point>(receiver)?.x = assigned::<i32>(value)?;
                    Ok(())
                })
        })
        .build()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("callscope=trace"))
        .with_target(false)
        .init();

    let weaver = Weaver::new(Arc::new(TracingSink::new()));
    let woven = weaver.apply_to_type(describe_point()?)?;

    println!("Woven {} with {} bindings", woven.name(), woven.binding_count());

    let instance = woven.construct(&[boxed(3), boxed(4)])?;
    let mut point = match instance.downcast::<Point>() {
        Ok(point) => *point,
        Err(_) => unreachable!("the constructor produces a Point"),
    };

    let receiver: &mut dyn Any = &mut point;
    let distance = woven
        .call(Some(receiver), "DistanceFromOrigin", &[])?
        .expect("DistanceFromOrigin bears a result");
    println!("Distance from origin: {}", distance);

    let write_receiver: &mut dyn Any = &mut point;
    woven.property_set(Some(write_receiver), "X", boxed(7))?;

    let read_receiver: &dyn Any = &point;
    let x = woven.property_get(Some(read_receiver), "X")?;
    println!("X after assignment: {}", x);

    println!("Weaver statistics: {}", weaver.stats());

    Ok(())
}
