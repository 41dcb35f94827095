use std::env;

fn main() {
    // Scheduler defaults can be overridden at build time.
    // SchedulerConfig::default() reads the values exported here.

    // Maximum number of registered tasks
    if let Ok(max_tasks) = env::var("PICO_TASKS_MAX_TASKS") {
        println!("cargo:rustc-env=PICO_TASKS_MAX_TASKS={}", max_tasks);
        println!(
            "cargo:warning=Using PICO_TASKS_MAX_TASKS from environment: {}",
            max_tasks
        );
    } else {
        println!("cargo:rustc-env=PICO_TASKS_MAX_TASKS=32");
    }

    // Default idle policy for threaded tasks (sleep | busy)
    match env::var("PICO_TASKS_IDLE_POLICY") {
        Ok(policy) if policy == "sleep" || policy == "busy" => {
            println!("cargo:rustc-env=PICO_TASKS_IDLE_POLICY={}", policy);
            println!(
                "cargo:warning=Using PICO_TASKS_IDLE_POLICY from environment: {}",
                policy
            );
        }
        Ok(policy) => {
            println!(
                "cargo:warning=Ignoring PICO_TASKS_IDLE_POLICY={} (expected sleep or busy)",
                policy
            );
            println!("cargo:rustc-env=PICO_TASKS_IDLE_POLICY=sleep");
        }
        Err(_) => println!("cargo:rustc-env=PICO_TASKS_IDLE_POLICY=sleep"),
    }

    // Stack size for host worker threads
    if let Ok(stack) = env::var("PICO_TASKS_STACK_BYTES") {
        println!("cargo:rustc-env=PICO_TASKS_STACK_BYTES={}", stack);
        println!(
            "cargo:warning=Using PICO_TASKS_STACK_BYTES from environment: {}",
            stack
        );
    } else {
        println!("cargo:rustc-env=PICO_TASKS_STACK_BYTES=65536");
    }

    // Rerun if environment variables change
    println!("cargo:rerun-if-env-changed=PICO_TASKS_MAX_TASKS");
    println!("cargo:rerun-if-env-changed=PICO_TASKS_IDLE_POLICY");
    println!("cargo:rerun-if-env-changed=PICO_TASKS_STACK_BYTES");
}
