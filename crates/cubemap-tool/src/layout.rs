use anyhow::{bail, Result};
use cubemap_engine::contract::{
    self, BindingSlot, BufferIndex, CubeUniforms, EnvironmentUniforms, PerInstanceUniforms,
    StructLayout, TextureIndex, VertexAttribute,
};
use cubemap_engine::ring::aligned_size;

pub fn execute() -> Result<()> {
    print_slots::<BufferIndex>();
    print_slots::<VertexAttribute>();
    print_slots::<TextureIndex>();

    let layouts = [
        StructLayout::of::<EnvironmentUniforms>(),
        StructLayout::of::<CubeUniforms>(),
        StructLayout::of::<PerInstanceUniforms>(),
    ];

    let mut failures = 0;
    for layout in &layouts {
        print_struct(layout);
        if let Err(err) = layout.check() {
            log::error!("{err}");
            failures += 1;
        }
    }

    contract::verify_contiguous::<BufferIndex>()?;
    contract::verify_contiguous::<VertexAttribute>()?;
    contract::verify_contiguous::<TextureIndex>()?;

    if failures > 0 {
        bail!("{failures} record(s) disagree between host and shader");
    }
    println!("all layouts verified");
    Ok(())
}

fn print_slots<S: BindingSlot>() {
    println!("{}", S::KIND);
    for &slot in S::ALL {
        println!("  {:<22} {}", slot.name(), slot.index());
    }
    println!();
}

fn print_struct(layout: &StructLayout) {
    println!(
        "{} ({} bytes, align {}, ring stride {})",
        layout.name,
        layout.size,
        layout.align,
        aligned_size(layout.host_size)
    );
    println!("  {:<24} {:<12} {:>6} {:>6}", "field", "type", "shader", "host");
    for field in &layout.fields {
        let marker = if field.offset == field.host_offset { "" } else { "  <- mismatch" };
        println!(
            "  {:<24} {:<12} {:>6} {:>6}{marker}",
            field.name,
            field.ty.wgsl(),
            field.offset,
            field.host_offset
        );
    }
    println!();
}
