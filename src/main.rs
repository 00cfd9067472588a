fn main() -> anyhow::Result<()> {
    donut_scene::run()
}
