//! Integration tests for the end-to-end tracing contract.
//!
//! Describes a small `Point` type with a constructor, a result-bearing method, and a
//! read/write property, weaves it, and asserts on the exact trace lines each invocation
//! emits alongside the pass-through behavior of the wrapped members.

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
        .method("MoveTo", |m| {
            m.parameter("x").parameter("y").body(|receiver, args| {
                let x = *arg::<i32>(args, 0)?;
                let y = *arg::<i32>(args, 1)?;
                let point = receiver_mut::<Point>(receiver)?;
                point.x = x;
                point.y = y;
                Ok(None)
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

fn weave_point() -> (Arc<WovenType>, Arc<BufferSink>) {
    let sink = Arc::new(BufferSink::new());
    let weaver = Weaver::new(sink.clone());
    let woven = weaver.apply_to_type(describe_point().unwrap()).unwrap();
    (woven, sink)
}

fn construct_point(woven: &WovenType, x: i32, y: i32) -> Point {
    let instance = woven.construct(&[boxed(x), boxed(y)]).unwrap();
    *instance.downcast::<Point>().unwrap()
}

#[test]
fn test_constructor_emits_bracketing_lines() {
    let (woven, sink) = weave_point();
    let point = construct_point(&woven, 3, 4);

    assert_eq!(point.x, 3);
    assert_eq!(point.y, 4);
    assert_eq!(
        sink.lines(),
        vec![
            "Entering Point.Point(3, 4)".to_string(),
            "Exiting Point.Point(3, 4)".to_string(),
        ]
    );
}

#[test]
fn test_method_exits_with_result() {
    let (woven, sink) = weave_point();
    let mut point = construct_point(&woven, 3, 4);
    sink.clear();

    let receiver: &mut dyn Any = &mut point;
    let result = woven
        .call(Some(receiver), "DistanceFromOrigin", &[])
        .unwrap()
        .unwrap();

    assert_eq!(result.to_string(), "5");
    assert_eq!(
        sink.lines(),
        vec![
            "Entering Point.DistanceFromOrigin()".to_string(),
            "Exiting Point.DistanceFromOrigin() with result 5".to_string(),
        ]
    );
}

#[test]
fn test_void_method_exits_without_result_clause() {
    let (woven, sink) = weave_point();
    let mut point = construct_point(&woven, 3, 4);
    sink.clear();

    let receiver: &mut dyn Any = &mut point;
    let result = woven
        .call(Some(receiver), "MoveTo", &[boxed(10), boxed(20)])
        .unwrap();

    assert!(result.is_none());
    assert_eq!(point.x, 10);
    assert_eq!(point.y, 20);
    assert_eq!(
        sink.lines(),
        vec![
            "Entering Point.MoveTo(10, 20)".to_string(),
            "Exiting Point.MoveTo(10, 20)".to_string(),
        ]
    );
}

#[test]
fn test_property_get_logs_value_read() {
    let (woven, sink) = weave_point();
    let point = construct_point(&woven, 3, 4);
    sink.clear();

    let receiver: &dyn Any = &point;
    let value = woven.property_get(Some(receiver), "X").unwrap();

    assert_eq!(value.to_string(), "3");
    assert_eq!(
        sink.lines(),
        vec![
            "Entering Point.X.get()".to_string(),
            "Exiting Point.X.get() with result 3".to_string(),
        ]
    );
}

#[test]
fn test_property_set_mutates_once_and_logs_assigned_value() {
    let (woven, sink) = weave_point();
    let mut point = construct_point(&woven, 3, 4);
    sink.clear();

    let receiver: &mut dyn Any = &mut point;
    woven.property_set(Some(receiver), "X", boxed(7)).unwrap();

    assert_eq!(point.x, 7);
    assert_eq!(
        sink.lines(),
        vec![
            "Entering Point.X.set(7)".to_string(),
            "Exiting Point.X.set(7)".to_string(),
        ]
    );
}

/// The full scenario: every call produces exactly its two lines, in order, and the
/// whole session reads as one uninterrupted trace stream.
#[test]
fn test_full_point_session_trace() {
    let (woven, sink) = weave_point();
    let mut point = construct_point(&woven, 3, 4);

    let receiver: &mut dyn Any = &mut point;
    woven
        .call(Some(receiver), "DistanceFromOrigin", &[])
        .unwrap();
    let read_receiver: &dyn Any = &point;
    woven.property_get(Some(read_receiver), "X").unwrap();
    let write_receiver: &mut dyn Any = &mut point;
    woven
        .property_set(Some(write_receiver), "X", boxed(7))
        .unwrap();

    assert_eq!(
        sink.lines(),
        vec![
            "Entering Point.Point(3, 4)".to_string(),
            "Exiting Point.Point(3, 4)".to_string(),
            "Entering Point.DistanceFromOrigin()".to_string(),
            "Exiting Point.DistanceFromOrigin() with result 5".to_string(),
            "Entering Point.X.get()".to_string(),
            "Exiting Point.X.get() with result 3".to_string(),
            "Entering Point.X.set(7)".to_string(),
            "Exiting Point.X.set(7)".to_string(),
        ]
    );
}

#[test]
fn test_wrapped_return_value_is_identical() {
    let (woven, _) = weave_point();
    let mut point = construct_point(&woven, 6, 8);

    let receiver: &mut dyn Any = &mut point;
    let wrapped = woven
        .call(Some(receiver), "DistanceFromOrigin", &[])
        .unwrap()
        .unwrap();

    let squared = point.x * point.x + point.y * point.y;
    let direct = f64::from(squared).sqrt() as i32;

    assert_eq!(*wrapped.into_any().downcast::<i32>().unwrap(), direct);
}

#[test]
fn test_failing_call_propagates_without_exit_line() {
    let sink = Arc::new(BufferSink::new());
    let weaver = Weaver::new(sink.clone());
    let descriptor = TypeDescriptor::builder("Meter")
        .method("Read", |m| {
            m.returns("int")
                .body(|_, _| Err(Error::Invocation("sensor offline".to_string())))
        })
        .build()
        .unwrap();
    let woven = weaver.apply_to_type(descriptor).unwrap();

    let error = woven.call(None, "Read", &[]).err().unwrap();

    assert_eq!(error.to_string(), "sensor offline");
    assert_eq!(sink.lines(), vec!["Entering Meter.Read()".to_string()]);
}

#[test]
fn test_failing_constructor_propagates_without_exit_line() {
    let sink = Arc::new(BufferSink::new());
    let weaver = Weaver::new(sink.clone());
    let descriptor = TypeDescriptor::builder("Guarded")
        .constructor(|c| {
            c.parameter("limit").body(|args| {
                let limit = *arg::<i32>(args, 0)?;
                if limit < 0 {
                    return Err(Error::Invocation("limit must not be negative".to_string()));
                }
                Ok(Box::new(limit) as Box<dyn Any>)
            })
        })
        .build()
        .unwrap();
    let woven = weaver.apply_to_type(descriptor).unwrap();

    let error = woven.construct(&[boxed(-1)]).err().unwrap();

    assert_eq!(error.to_string(), "limit must not be negative");
    assert_eq!(sink.lines(), vec!["Entering Guarded.Guarded(-1)".to_string()]);
}
