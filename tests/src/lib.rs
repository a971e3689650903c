mod reboot_cycle;
mod snapshot;
