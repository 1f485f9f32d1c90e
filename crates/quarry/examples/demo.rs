//! Walk-through of an arena-backed queue.
//!
//! Run with `RUST_LOG=quarry_arena=trace cargo run --example demo` to see
//! every allocation and release as it happens.

use quarry::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Person {
    name: String,
    age: u32,
}

impl Person {
    fn new(name: &str, age: u32) -> Self {
        Self {
            name: name.to_string(),
            age,
        }
    }
}

fn demo_int() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== queue of integers ===");
    let arena = ArenaAllocator::new(1024)?;
    let mut queue = Queue::with_resource(&arena);

    queue.try_extend([1, 2, 3])?;
    let contents: Vec<String> = queue.iter().map(|v| v.to_string()).collect();
    println!("contents: {}", contents.join(" "));
    println!("front: {}", queue.front());

    queue.pop();
    println!("after pop, front: {}", queue.front());
    println!("size: {}", queue.len());
    println!("arena: {}", arena.stats());
    Ok(())
}

fn demo_struct() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== queue of structs ===");
    let arena = ArenaAllocator::new(2048)?;
    let mut queue = Queue::with_resource(&arena);

    queue.push(Person::new("Alice", 25))?;
    queue.push(Person::new("Bob", 30))?;
    queue.push(Person::new("Charlie", 35))?;

    let contents: Vec<String> = queue
        .iter()
        .map(|p| format!("{} ({})", p.name, p.age))
        .collect();
    println!("contents: {}", contents.join(" "));
    println!("size: {}", queue.len());
    Ok(())
}

fn demo_fragmentation() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== fragmentation ===");
    let arena = ArenaAllocator::new(300)?;
    let a = arena.allocate(100)?;
    let _b = arena.allocate(100)?;
    let c = arena.allocate(100)?;
    arena.deallocate(a, 100);
    arena.deallocate(c, 100);
    println!("arena: {}", arena.stats());
    match arena.allocate(150) {
        Ok(offset) => println!("unexpectedly allocated at {offset}"),
        Err(err) => println!("allocate(150): {err}"),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    demo_int()?;
    demo_struct()?;
    demo_fragmentation()?;
    tracing::info!("demo finished");
    Ok(())
}
