//! Scheduler demo on the host
//!
//! Registers four tasks the way a microcontroller sketch would:
//!
//! - `blink`: toggles a simulated LED every 500 ms (main loop)
//! - `math`: square-root sum every 100 ms (threaded, yields mid-computation)
//! - `fast`: runs on every main-loop pass
//! - `debug`: status line every 300 ms (threaded)
//!
//! The main loop toggles the math task every 5 seconds and prints a heartbeat
//! every second. After 12 seconds it shuts the workers down and prints the
//! per-task statistics.
//!
//! Run with: `cargo run --example scheduler_demo`

use pico_tasks::core::traits::{SharedState, StdState};
use pico_tasks::platform::{StdClock, StdThreads};
use pico_tasks::{Scheduler, SchedulerConfig, TaskId, TaskSpec, ThreadProvider, TimeSource};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const RUN_FOR_MS: u32 = 12_000;
const TOGGLE_EVERY_MS: u32 = 5_000;
const HEARTBEAT_EVERY_MS: u32 = 1_000;

/// Serial console shared by every task
#[derive(Default)]
struct Console {
    lines: u32,
}

impl Console {
    fn println(&mut self, line: &str) {
        self.lines += 1;
        println!("{line}");
    }
}

/// Everything the callbacks share, passed in explicitly
struct DemoContext {
    console: StdState<Console>,
    led_on: AtomicBool,
    math_enabled: AtomicBool,
    task_count: AtomicUsize,
}

fn main() {
    let config = SchedulerConfig::default();
    let clock = StdClock::new();
    let threads = StdThreads::from_config(&config);
    let mut scheduler = Scheduler::with_config(clock, threads.clone(), config);

    let ctx = Arc::new(DemoContext {
        console: StdState::new(Console::default()),
        led_on: AtomicBool::new(false),
        math_enabled: AtomicBool::new(true),
        task_count: AtomicUsize::new(0),
    });

    ctx.console.with_mut(|c| c.println(">>> Scheduler Demo Starting <<<"));

    let blink = {
        let ctx = Arc::clone(&ctx);
        TaskSpec::new(move || {
            ctx.led_on.fetch_xor(true, Ordering::Relaxed);
            ctx.console.with_mut(|c| c.println("[LED] Toggled."));
        })
        .named("blink")
        .every(500)
    };

    let math = {
        let ctx = Arc::clone(&ctx);
        let threads = threads.clone();
        TaskSpec::new(move || {
            let mut result = 0.0f32;
            for i in 1..500u16 {
                result += f32::from(i).sqrt();
                if i % 25 == 0 {
                    threads.yield_now();
                }
            }
            std::hint::black_box(result);
            ctx.console.with_mut(|c| c.println("[MATH] Calculation done."));
        })
        .named("math")
        .every(100)
        .threaded()
    };

    let fast = {
        let mut dummy = 0.0f32;
        TaskSpec::new(move || {
            dummy += 1.1;
            std::hint::black_box(dummy);
        })
        .named("fast")
    };

    let debug = {
        let ctx = Arc::clone(&ctx);
        TaskSpec::new(move || {
            let line = format!(
                "[DEBUG] Total tasks: {} | Math task is {}",
                ctx.task_count.load(Ordering::Relaxed),
                if ctx.math_enabled.load(Ordering::Relaxed) {
                    "ENABLED"
                } else {
                    "DISABLED"
                }
            );
            ctx.console.with_mut(|c| c.println(&line));
        })
        .named("debug")
        .every(300)
        .threaded()
    };

    let ids = match [blink, math, fast, debug]
        .into_iter()
        .map(|spec| scheduler.register(spec))
        .collect::<Result<Vec<TaskId>, _>>()
    {
        Ok(ids) => ids,
        Err(e) => {
            eprintln!("[INIT] Registration failed: {e}");
            return;
        }
    };
    let math_id = ids[1];
    ctx.task_count.store(scheduler.task_count(), Ordering::Relaxed);

    ctx.console.with_mut(|c| {
        c.println("[INIT] Tasks added.");
        c.println(&format!(
            "[INIT] Total tasks registered: {}",
            scheduler.task_count()
        ));
        c.println("[INFO] Math task will toggle on/off every 5 seconds.");
    });

    let mut last_heartbeat = 0u32;
    let mut last_toggle = 0u32;
    loop {
        let now = clock.now_ms();
        if now >= RUN_FOR_MS {
            break;
        }

        scheduler.update();

        if now.wrapping_sub(last_heartbeat) >= HEARTBEAT_EVERY_MS {
            last_heartbeat = now;
            ctx.console.with_mut(|c| c.println("Main loop running..."));
        }

        if now.wrapping_sub(last_toggle) >= TOGGLE_EVERY_MS {
            last_toggle = now;
            ctx.console.with_mut(|c| {
                if ctx.math_enabled.load(Ordering::Relaxed) {
                    scheduler.disable_task(math_id);
                    c.println("[CONTROL] Math task DISABLED.");
                } else {
                    scheduler.enable_task(math_id);
                    c.println("[CONTROL] Math task ENABLED.");
                }
            });
            ctx.math_enabled.fetch_xor(true, Ordering::Relaxed);
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    scheduler.shutdown();
    let joined = threads.join_all();

    println!("--- {joined} worker threads stopped ---");
    for (id, info) in scheduler.iter_tasks() {
        println!(
            "{id} {:<6} {:>5} ms  {:<18} runs={:<6} max={} ms",
            info.name,
            info.interval_ms,
            info.mode.as_str(),
            info.stats.invocations,
            info.stats.max_execution_ms
        );
    }
    let stats = scheduler.stats();
    println!(
        "{} tasks, {} threaded, {} invocations, {} console lines",
        stats.task_count,
        stats.threaded_count,
        stats.total_invocations,
        ctx.console.with(|c| c.lines)
    );
}
