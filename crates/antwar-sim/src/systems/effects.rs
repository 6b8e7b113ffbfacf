//! Effect records age by one tick and are dropped once expired.

use antwar_core::events::EffectRecord;

pub fn run(effects: &mut Vec<EffectRecord>) {
    for effect in effects.iter_mut() {
        effect.age += 1;
    }
    effects.retain(|e| !e.is_expired());
}
