//! Script command dispatch.
//!
//! The dispatcher is a stateless routing layer: commands address the
//! session stores and the collaborator surfaces, and every call is a
//! synchronous, run-to-completion operation. Argument lists are checked
//! against the per-command schema before anything executes.

mod registry;

use std::sync::Arc;

use log::warn;
use thiserror::Error;

use crate::entity::{EntityClass, EntityRef, StateFlag};
use crate::environment::{Climate, Weather};
use crate::error::WorldError;
use crate::session::Session;
use crate::surface::{
    AudioSurface, HostSignal, HudSurface, NullAudio, NullHost, NullHud, NullRender, RenderSurface,
};
use crate::value::Value;

pub use registry::{all as commands, find as find_command, CommandSpec};

/// Failures surfaced to the script-call site.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`{command}` expects {required} argument(s), got {got}")]
    MissingArgument {
        command: &'static str,
        required: usize,
        got: usize,
    },

    #[error("`{command}` argument `{param}` expects {expected}, got {got}")]
    InvalidArgument {
        command: &'static str,
        param: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    #[error(transparent)]
    World(#[from] WorldError),
}

/// Validated argument view handed to command implementations.
struct Args<'a> {
    spec: &'static CommandSpec,
    values: &'a [Value],
}

const NIL: Value = Value::Nil;

impl<'a> Args<'a> {
    fn value(&self, index: usize) -> &Value {
        self.values.get(index).unwrap_or(&NIL)
    }

    fn param_name(&self, index: usize) -> &'static str {
        self.spec
            .params
            .get(index)
            .map(|param| param.name)
            .unwrap_or("?")
    }

    fn invalid(&self, index: usize, expected: &'static str) -> CommandError {
        CommandError::InvalidArgument {
            command: self.spec.name,
            param: self.param_name(index),
            expected,
            got: self.value(index).type_name(),
        }
    }

    fn num(&self, index: usize) -> Result<f64, CommandError> {
        self.value(index)
            .as_num()
            .ok_or_else(|| self.invalid(index, "number"))
    }

    fn num_or(&self, index: usize, default: f64) -> f64 {
        self.value(index).as_num().unwrap_or(default)
    }

    fn int(&self, index: usize) -> Result<i64, CommandError> {
        self.value(index)
            .as_int()
            .ok_or_else(|| self.invalid(index, "int"))
    }

    fn int_or(&self, index: usize, default: i64) -> i64 {
        self.value(index).as_int().unwrap_or(default)
    }

    fn bool_or(&self, index: usize, default: bool) -> bool {
        self.value(index).as_bool().unwrap_or(default)
    }

    fn str(&self, index: usize) -> Result<&str, CommandError> {
        self.value(index)
            .as_str()
            .ok_or_else(|| self.invalid(index, "string"))
    }

    fn str_or(&self, index: usize, default: &'a str) -> &str {
        self.value(index).as_str().unwrap_or(default)
    }

    fn list(&self, index: usize) -> Result<&[Value], CommandError> {
        self.value(index)
            .as_list()
            .ok_or_else(|| self.invalid(index, "list"))
    }

    fn class(&self, index: usize) -> Result<EntityClass, CommandError> {
        Ok(EntityClass::from_raw(self.int(index)?)?)
    }

    fn state(&self, index: usize) -> Result<StateFlag, CommandError> {
        Ok(StateFlag::from_raw(self.int(index)?)?)
    }

    fn climate(&self, index: usize) -> Result<Climate, CommandError> {
        Climate::from_raw(self.int(index)?).ok_or_else(|| self.invalid(index, "climate"))
    }

    fn weather(&self, index: usize) -> Result<Weather, CommandError> {
        Weather::from_raw(self.int(index)?).ok_or_else(|| self.invalid(index, "weather"))
    }

    /// (class, id) address from two adjacent arguments.
    fn entity_ref(&self, class_index: usize, id_index: usize) -> Result<EntityRef, CommandError> {
        Ok(EntityRef::new(
            self.class(class_index)?,
            self.int(id_index)?,
        ))
    }
}

/// Routes named script commands onto one session's stores and the
/// external collaborator surfaces.
pub struct Dispatcher {
    session: Session,
    render: Arc<dyn RenderSurface>,
    audio: Arc<dyn AudioSurface>,
    hud: Arc<dyn HudSurface>,
    host: Arc<dyn HostSignal>,
}

impl Dispatcher {
    pub fn new(
        session: Session,
        render: Arc<dyn RenderSurface>,
        audio: Arc<dyn AudioSurface>,
        hud: Arc<dyn HudSurface>,
        host: Arc<dyn HostSignal>,
    ) -> Self {
        Self {
            session,
            render,
            audio,
            hud,
            host,
        }
    }

    /// Dispatcher with null collaborator surfaces, for headless hosts
    /// and tests.
    pub fn headless(session: Session) -> Self {
        Self::new(
            session,
            Arc::new(NullRender),
            Arc::new(NullAudio),
            Arc::new(NullHud),
            Arc::new(NullHost),
        )
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Executes a command by name.
    ///
    /// Arguments are validated against the command schema first;
    /// placeholder commands then return `Nil` without touching any
    /// state. Unknown entity classes and unknown setting keys degrade to
    /// `Nil` with a warning; a missing entity is a hard
    /// `EntityNotFound`.
    pub fn dispatch(&self, name: &str, values: &[Value]) -> Result<Value, CommandError> {
        let spec = registry::find(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
        self.check_args(spec, values)?;
        if spec.noop {
            return Ok(Value::Nil);
        }
        let args = Args { spec, values };
        match self.execute(&args) {
            Err(CommandError::World(err)) if degrades_gracefully(&err) => {
                warn!("{}: {err}", spec.name);
                Ok(Value::Nil)
            }
            other => other,
        }
    }

    fn check_args(&self, spec: &'static CommandSpec, values: &[Value]) -> Result<(), CommandError> {
        for (index, param) in spec.params.iter().enumerate() {
            match values.get(index) {
                None | Some(Value::Nil) => {
                    if param.required {
                        return Err(CommandError::MissingArgument {
                            command: spec.name,
                            required: spec.required_count(),
                            got: values.iter().filter(|value| !value.is_nil()).count(),
                        });
                    }
                }
                Some(value) => {
                    if !param.kind.accepts(value) {
                        return Err(CommandError::InvalidArgument {
                            command: spec.name,
                            param: param.name,
                            expected: param.kind.expected(),
                            got: value.type_name(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn execute(&self, args: &Args<'_>) -> Result<Value, CommandError> {
        let session = &self.session;
        let player = session.player();
        let clock = session.clock();
        let env = session.environment();
        let entities = session.entities();

        let result = match args.spec.name {
            "abs" => Value::Num(args.num(0)?.abs()),
            "addstate" => {
                entities.add_state(args.entity_ref(0, 1)?, args.state(2)?)?;
                Value::Nil
            }
            "air" => {
                player.set_air(args.num(0)?);
                Value::Nil
            }
            "alpha" => {
                let alpha = args.num(0)?;
                let entity = entities.lookup(args.entity_ref(1, 2)?)?;
                if let Some(mesh) = entity.mesh {
                    self.render.set_material_alpha(mesh, alpha);
                }
                Value::Nil
            }
            "alterobject" => {
                let addr = EntityRef::new(EntityClass::Object, args.int(0)?);
                let new_type = args.int(1)?;
                entities.update(addr, |entity| entity.entity_type = new_type)?;
                Value::Nil
            }
            "climate" => {
                env.set_climate(args.climate(0)?);
                Value::Nil
            }
            "compass" => {
                player.set_show_compass(args.bool_or(0, true));
                Value::Nil
            }
            "consume" => {
                player.consume(
                    args.num_or(0, 0.0),
                    args.num_or(1, 0.0),
                    args.num_or(2, 0.0),
                    args.num_or(3, 0.0),
                );
                Value::Nil
            }
            "cos" => Value::Num(scaled_trig(args.num(0)?.cos(), args.bool_or(1, false))),
            "count_state" => Value::Int(entities.count_by_state(args.state(0)?) as i64),
            "day" => Value::Int(clock.day()),
            "drink" => {
                self.audio.play_effect("drink");
                player.consume(
                    args.num_or(0, 0.0),
                    args.num_or(1, 0.0),
                    args.num_or(2, 0.0),
                    args.num_or(3, 0.0),
                );
                Value::Nil
            }
            "eat" => {
                self.audio.play_effect("eat");
                player.consume(
                    args.num_or(0, 0.0),
                    args.num_or(1, 0.0),
                    args.num_or(2, 0.0),
                    args.num_or(3, 0.0),
                );
                Value::Nil
            }
            "extract" => {
                let term = args.str(0)?;
                let start = args.int(1)?;
                let length = args.value(2).as_int();
                Value::Str(substring(term, start, length))
            }
            "find" => {
                let item_type = args.int(0)?;
                let amount = args.int_or(1, 1);
                player.find_item(item_type, amount);
                self.hud.item_found(item_type, amount);
                Value::Nil
            }
            "freeskill" => {
                player.free_skill(args.str(0)?);
                Value::Nil
            }
            "freevar" => {
                for name in args.list(0)? {
                    if let Some(name) = name.as_str() {
                        session.free_variable(name);
                    }
                }
                Value::Nil
            }
            "getplayerammo" => Value::Int(player.ammo()),
            "getplayervalue" => match args.int(0)? {
                1 => Value::Num(player.vitals().energy),
                2 => Value::Num(player.vitals().hunger),
                3 => Value::Num(player.vitals().thirst),
                4 => Value::Num(player.vitals().exhaustion),
                _ => Value::Nil,
            },
            "getplayerweapon" => Value::Int(player.weapon()),
            "getsetting" => self.setting(args.str(0)?)?,
            "getweather" => Value::Int(env.weather().raw()),
            "gotskill" => Value::Bool(player.got_skill(args.str(0)?)),
            "heal" => {
                let value = args.num(2)?;
                entities.update(args.entity_ref(0, 1)?, |entity| entity.health += value)?;
                Value::Nil
            }
            "health" => {
                let addr = args.entity_ref(0, 1)?;
                let change = args.num_or(2, 0.0);
                if change != 0.0 {
                    entities.update(addr, |entity| entity.health += change)?;
                }
                Value::Num(entities.lookup(addr)?.health)
            }
            "hour" => Value::Int(clock.hour()),
            "incskill" => {
                player.inc_skill(args.str(0)?, args.num_or(1, 0.0), args.str_or(2, ""));
                Value::Nil
            }
            "int" => parse_int(args.value(0)),
            "jade" => {
                let amount = args.num(0)?;
                player.consume(0.0, amount, amount, amount);
                Value::Nil
            }
            "join" => {
                let parts: Vec<String> =
                    args.list(0)?.iter().map(|value| value.to_string()).collect();
                Value::Str(parts.join(","))
            }
            "jumpfactor" => {
                player.set_jump_factor(args.num(0)?);
                Value::Nil
            }
            "jumptime" => {
                player.set_jump_time(args.num(0)?);
                Value::Nil
            }
            "kill" => {
                let addr = EntityRef::new(EntityClass::Unit, args.int(0)?);
                entities.update(addr, |entity| entity.health = 0.0)?;
                Value::Nil
            }
            "length" => Value::Int(args.str(0)?.chars().count() as i64),
            "minute" => Value::Int(clock.minute()),
            "music" => {
                self.audio.load_track(args.str(0)?, args.num_or(1, 1.0));
                Value::Nil
            }
            "musicvolume" => {
                self.audio.set_volume(args.num(0)?);
                Value::Nil
            }
            "player_ammo" => {
                player.set_ammo(args.int(0)?);
                Value::Nil
            }
            "player_damage" => {
                player.set_damage(args.num(0)?);
                Value::Nil
            }
            "player_maxweight" => {
                player.set_max_weight(args.num(0)?);
                Value::Nil
            }
            "player_speed" => {
                player.set_speed(args.num(0)?);
                Value::Nil
            }
            "player_weapon" => {
                player.set_weapon(args.int(0)?);
                Value::Nil
            }
            "quit" => {
                self.host.quit();
                Value::Nil
            }
            "rainratio" => {
                env.set_rain_ratio(args.num(0)?);
                Value::Nil
            }
            "random" => {
                let first = args.num(0)?;
                let rnd: f64 = rand::random();
                let result = match args.value(1).as_num() {
                    Some(max) => (rnd * (max - first)).floor() + first,
                    None => (rnd * first).floor(),
                };
                Value::Int(result as i64)
            }
            "replace" => Value::Str(replace_ignore_ascii_case(
                args.str(0)?,
                args.str(1)?,
                args.str(2)?,
            )),
            "setday" => {
                clock.set_day(args.int(0)?);
                Value::Nil
            }
            "sethour" => {
                clock.set_hour(args.int(0)?);
                Value::Nil
            }
            "setminute" => {
                clock.set_minute(args.int(0)?);
                Value::Nil
            }
            "setskill" => {
                player.set_skill(args.str(0)?, args.num_or(1, 0.0), args.str_or(2, ""));
                Value::Nil
            }
            "sin" => Value::Num(scaled_trig(args.num(0)?.sin(), args.bool_or(1, false))),
            "skillname" => {
                player.rename_skill(args.str(0)?, args.str(1)?);
                Value::Nil
            }
            "skillvalue" => Value::Num(player.skill_value(args.str(0)?)),
            "sleep" => {
                player.set_sleeping(true);
                Value::Nil
            }
            "sleeping" => Value::Bool(player.sleeping()),
            "snowratio" => {
                env.set_snow_ratio(args.num(0)?);
                Value::Nil
            }
            "split" => {
                let term = args.str(0)?;
                let delimiter = args.str(1)?;
                let part = args.int(2)?;
                split_part(term, delimiter, part)
            }
            "stopmusic" => {
                self.audio.pause();
                Value::Nil
            }
            "tan" => Value::Num(scaled_trig(args.num(0)?.tan(), args.bool_or(1, false))),
            "trim" => Value::Str(args.str(0)?.trim().to_string()),
            "wateralpha" => {
                self.render.set_ocean_alpha(args.num(0)?);
                Value::Nil
            }
            "weather" => {
                env.set_weather(args.weather(0)?);
                Value::Nil
            }
            other => {
                // Every non-placeholder registry entry must be handled
                // above; reaching this arm is a catalogue bug.
                warn!("command `{other}` is registered but not wired");
                Value::Nil
            }
        };
        Ok(result)
    }

    fn setting(&self, key: &str) -> Result<Value, CommandError> {
        let settings = self.session.settings();
        let value = match key {
            "xres" => Value::Int(settings.xres as i64),
            "yres" => Value::Int(settings.yres as i64),
            "depth" => Value::Int(settings.depth as i64),
            "debug" => Value::Bool(settings.debug),
            "viewrange" => Value::Num(settings.view_range),
            "gore" => Value::Bool(settings.gore),
            "commandline" => Value::Str(settings.command_line),
            "time" => Value::Str(self.session.clock().formatted_time()),
            "date" => Value::Str(format!("Day {}", self.session.clock().day())),
            "version" => Value::Str(settings.version),
            other => return Err(WorldError::UnknownSetting(other.to_string()).into()),
        };
        Ok(value)
    }
}

fn degrades_gracefully(err: &WorldError) -> bool {
    matches!(
        err,
        WorldError::UnknownClass(_) | WorldError::UnknownSetting(_)
    )
}

fn scaled_trig(value: f64, factor100: bool) -> f64 {
    if factor100 {
        value * 100.0
    } else {
        value
    }
}

/// Character-based substring with the classic substr contract: a
/// negative start counts from the end, the optional length runs to the
/// end when omitted.
fn substring(term: &str, start: i64, length: Option<i64>) -> String {
    let chars: Vec<char> = term.chars().collect();
    let len = chars.len() as i64;
    let start = if start < 0 {
        (len + start).max(0)
    } else {
        start.min(len)
    } as usize;
    let take = match length {
        Some(length) if length > 0 => length as usize,
        Some(_) => 0,
        None => chars.len(),
    };
    chars.into_iter().skip(start).take(take).collect()
}

/// Leading-integer parse: optional sign followed by digits, surrounding
/// whitespace ignored. Values with no leading integer yield `Nil`.
fn parse_int(value: &Value) -> Value {
    match value {
        Value::Int(value) => Value::Int(*value),
        Value::Num(value) => Value::Int(*value as i64),
        Value::Str(text) => {
            let text = text.trim_start();
            let (sign, digits) = match text.strip_prefix('-') {
                Some(rest) => (-1, rest),
                None => (1, text.strip_prefix('+').unwrap_or(text)),
            };
            let digits: String = digits.chars().take_while(|ch| ch.is_ascii_digit()).collect();
            match digits.parse::<i64>() {
                Ok(number) => Value::Int(sign * number),
                Err(_) => Value::Nil,
            }
        }
        _ => Value::Nil,
    }
}

fn replace_ignore_ascii_case(term: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return term.to_string();
    }
    let mut out = String::with_capacity(term.len());
    let mut rest = term;
    while !rest.is_empty() {
        if rest.len() >= from.len()
            && rest.is_char_boundary(from.len())
            && rest[..from.len()].eq_ignore_ascii_case(from)
        {
            out.push_str(to);
            rest = &rest[from.len()..];
        } else if let Some(ch) = rest.chars().next() {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        } else {
            break;
        }
    }
    out
}

fn split_part(term: &str, delimiter: &str, part: i64) -> Value {
    if part < 0 {
        return Value::Nil;
    }
    if delimiter.is_empty() {
        return match term.chars().nth(part as usize) {
            Some(ch) => Value::Str(ch.to_string()),
            None => Value::Nil,
        };
    }
    match term.split(delimiter).nth(part as usize) {
        Some(piece) => Value::Str(piece.to_string()),
        None => Value::Nil,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use parking_lot::Mutex;

    fn session_with_unit(id: i64) -> Session {
        let session = Session::new();
        session.entities().insert(Entity::new(EntityClass::Unit, id));
        session
    }

    fn dispatch(dispatcher: &Dispatcher, name: &str, args: &[Value]) -> Value {
        dispatcher.dispatch(name, args).unwrap()
    }

    #[derive(Default)]
    struct RecordingAudio {
        calls: Mutex<Vec<String>>,
    }

    impl AudioSurface for RecordingAudio {
        fn load_track(&self, path: &str, volume: f64) {
            self.calls.lock().push(format!("load {path} @{volume}"));
        }
        fn set_volume(&self, volume: f64) {
            self.calls.lock().push(format!("volume {volume}"));
        }
        fn pause(&self) {
            self.calls.lock().push("pause".to_string());
        }
        fn play_effect(&self, name: &str) {
            self.calls.lock().push(format!("effect {name}"));
        }
    }

    #[derive(Default)]
    struct RecordingRender {
        calls: Mutex<Vec<String>>,
    }

    impl RenderSurface for RecordingRender {
        fn set_material_alpha(&self, mesh: crate::entity::MeshHandle, alpha: f64) {
            self.calls.lock().push(format!("alpha {} {alpha}", mesh.0));
        }
        fn set_ocean_alpha(&self, alpha: f64) {
            self.calls.lock().push(format!("ocean {alpha}"));
        }
        fn attach_shadow_caster(&self, mesh: crate::entity::MeshHandle) {
            self.calls.lock().push(format!("shadow {}", mesh.0));
        }
        fn set_mesh_enabled(&self, mesh: crate::entity::MeshHandle, enabled: bool) {
            self.calls.lock().push(format!("enabled {} {enabled}", mesh.0));
        }
        fn set_mesh_visibility(&self, mesh: crate::entity::MeshHandle, visibility: f64) {
            self.calls
                .lock()
                .push(format!("visibility {} {visibility}", mesh.0));
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        quits: Mutex<usize>,
    }

    impl HostSignal for RecordingHost {
        fn quit(&self) {
            *self.quits.lock() += 1;
        }
    }

    #[test]
    fn heal_then_health_then_kill() {
        let dispatcher = Dispatcher::headless(session_with_unit(1));
        let unit = EntityClass::Unit.raw();

        dispatch(
            &dispatcher,
            "heal",
            &[Value::Int(unit), Value::Int(1), Value::Num(10.0)],
        );
        assert_eq!(
            dispatch(&dispatcher, "health", &[Value::Int(unit), Value::Int(1)]),
            Value::Num(10.0)
        );

        dispatch(&dispatcher, "kill", &[Value::Int(1)]);
        assert_eq!(
            dispatch(&dispatcher, "health", &[Value::Int(unit), Value::Int(1)]),
            Value::Num(0.0)
        );
    }

    #[test]
    fn kill_unknown_unit_is_entity_not_found() {
        let dispatcher = Dispatcher::headless(Session::new());
        let err = dispatcher.dispatch("kill", &[Value::Int(404)]).unwrap_err();
        assert_eq!(
            err,
            CommandError::World(WorldError::EntityNotFound {
                class: EntityClass::Unit,
                id: 404
            })
        );
    }

    #[test]
    fn duplicate_addstate_counts_once() {
        let dispatcher = Dispatcher::headless(session_with_unit(3));
        let unit = EntityClass::Unit.raw();
        let fire = StateFlag::Fire.raw();
        for _ in 0..2 {
            dispatch(
                &dispatcher,
                "addstate",
                &[Value::Int(unit), Value::Int(3), Value::Int(fire)],
            );
        }
        assert_eq!(
            dispatch(&dispatcher, "count_state", &[Value::Int(fire)]),
            Value::Int(1)
        );
    }

    #[test]
    fn stub_commands_are_callable_and_inert() {
        let session = session_with_unit(1);
        let before = session.entities().lookup(EntityRef::new(EntityClass::Unit, 1)).unwrap();
        let dispatcher = Dispatcher::headless(session.clone());

        assert_eq!(
            dispatch(&dispatcher, "thunder", &[]),
            Value::Nil
        );
        assert_eq!(
            dispatch(
                &dispatcher,
                "damage",
                &[Value::Int(EntityClass::Unit.raw()), Value::Int(1), Value::Num(5.0)]
            ),
            Value::Nil
        );

        let after = session.entities().lookup(EntityRef::new(EntityClass::Unit, 1)).unwrap();
        assert_eq!(before, after);
        assert_eq!(session.player().vitals(), Default::default());
    }

    #[test]
    fn stub_commands_still_check_arguments() {
        let dispatcher = Dispatcher::headless(Session::new());
        let err = dispatcher.dispatch("damage", &[]).unwrap_err();
        assert!(matches!(err, CommandError::MissingArgument { .. }));

        let err = dispatcher
            .dispatch("echo", &[Value::Int(42)])
            .unwrap_err();
        assert!(matches!(err, CommandError::InvalidArgument { .. }));
    }

    #[test]
    fn unknown_command_is_rejected() {
        let dispatcher = Dispatcher::headless(Session::new());
        assert_eq!(
            dispatcher.dispatch("teleport", &[]).unwrap_err(),
            CommandError::UnknownCommand("teleport".to_string())
        );
    }

    #[test]
    fn unknown_class_degrades_to_nil() {
        let dispatcher = Dispatcher::headless(Session::new());
        let result = dispatcher
            .dispatch("health", &[Value::Int(99), Value::Int(1)])
            .unwrap();
        assert_eq!(result, Value::Nil);
    }

    #[test]
    fn unknown_setting_degrades_to_nil() {
        let dispatcher = Dispatcher::headless(Session::new());
        assert_eq!(
            dispatch(&dispatcher, "getsetting", &[Value::Str("warp".into())]),
            Value::Nil
        );
        assert_eq!(
            dispatch(&dispatcher, "getsetting", &[Value::Str("viewrange".into())]),
            Value::Num(2000.0)
        );
    }

    #[test]
    fn find_accumulates_inventory() {
        let dispatcher = Dispatcher::headless(Session::new());
        dispatch(&dispatcher, "find", &[Value::Int(23), Value::Int(3)]);
        dispatch(&dispatcher, "find", &[Value::Int(23), Value::Int(2)]);
        assert_eq!(dispatcher.session().player().item_amount(23), 5);
    }

    #[test]
    fn consume_commands_are_unbounded_and_eat_plays_a_cue() {
        let audio = Arc::new(RecordingAudio::default());
        let dispatcher = Dispatcher::new(
            Session::new(),
            Arc::new(NullRender),
            audio.clone(),
            Arc::new(NullHud),
            Arc::new(NullHost),
        );
        dispatch(
            &dispatcher,
            "consume",
            &[
                Value::Num(-50.0),
                Value::Num(-50.0),
                Value::Num(-50.0),
                Value::Num(-50.0),
            ],
        );
        dispatch(&dispatcher, "eat", &[Value::Num(10.0)]);
        let vitals = dispatcher.session().player().vitals();
        assert_eq!(vitals.energy, -40.0);
        assert_eq!(vitals.hunger, -50.0);
        assert!(audio.calls.lock().contains(&"effect eat".to_string()));
    }

    #[test]
    fn skill_commands_follow_the_increment_contract() {
        let dispatcher = Dispatcher::headless(Session::new());
        dispatch(&dispatcher, "freeskill", &[Value::Str("digging".into())]);
        dispatch(
            &dispatcher,
            "incskill",
            &[Value::Str("digging".into()), Value::Num(4.0), Value::Str("Graben".into())],
        );
        assert_eq!(
            dispatch(&dispatcher, "skillvalue", &[Value::Str("digging".into())]),
            Value::Num(4.0)
        );
        dispatch(
            &dispatcher,
            "incskill",
            &[Value::Str("digging".into()), Value::Num(1.0), Value::Str("Graben".into())],
        );
        assert_eq!(
            dispatch(&dispatcher, "skillvalue", &[Value::Str("digging".into())]),
            Value::Num(5.0)
        );
        assert_eq!(
            dispatch(&dispatcher, "gotskill", &[Value::Str("digging".into())]),
            Value::Bool(true)
        );
    }

    #[test]
    fn clock_commands_round_trip() {
        let dispatcher = Dispatcher::headless(Session::new());
        dispatch(&dispatcher, "setminute", &[Value::Int(30)]);
        dispatch(&dispatcher, "sethour", &[Value::Int(14)]);
        assert_eq!(dispatch(&dispatcher, "hour", &[]), Value::Int(14));
        assert_eq!(dispatch(&dispatcher, "minute", &[]), Value::Int(30));
        dispatch(&dispatcher, "setday", &[Value::Int(12)]);
        assert_eq!(dispatch(&dispatcher, "day", &[]), Value::Int(12));
    }

    #[test]
    fn environment_commands_update_state() {
        let dispatcher = Dispatcher::headless(Session::new());
        dispatch(&dispatcher, "climate", &[Value::Int(Climate::Snow.raw())]);
        dispatch(&dispatcher, "weather", &[Value::Int(Weather::Rain.raw())]);
        dispatch(&dispatcher, "rainratio", &[Value::Num(0.8)]);
        let env = dispatcher.session().environment();
        assert_eq!(env.climate(), Climate::Snow);
        assert_eq!(env.weather(), Weather::Rain);
        assert_eq!(env.rain_ratio(), 0.8);
        assert_eq!(
            dispatch(&dispatcher, "getweather", &[]),
            Value::Int(Weather::Rain.raw())
        );
    }

    #[test]
    fn music_commands_drive_the_audio_surface() {
        let audio = Arc::new(RecordingAudio::default());
        let dispatcher = Dispatcher::new(
            Session::new(),
            Arc::new(NullRender),
            audio.clone(),
            Arc::new(NullHud),
            Arc::new(NullHost),
        );
        dispatch(
            &dispatcher,
            "music",
            &[Value::Str("sounds/theme.ogg".into()), Value::Num(0.5)],
        );
        dispatch(&dispatcher, "stopmusic", &[]);
        let calls = audio.calls.lock();
        assert_eq!(calls[0], "load sounds/theme.ogg @0.5");
        assert_eq!(calls[1], "pause");
    }

    #[test]
    fn wateralpha_drives_the_renderer() {
        let render = Arc::new(RecordingRender::default());
        let dispatcher = Dispatcher::new(
            Session::new(),
            render.clone(),
            Arc::new(NullAudio),
            Arc::new(NullHud),
            Arc::new(NullHost),
        );
        dispatch(&dispatcher, "wateralpha", &[Value::Num(0.4)]);
        assert_eq!(render.calls.lock().as_slice(), ["ocean 0.4"]);
    }

    #[test]
    fn quit_reaches_the_host() {
        let host = Arc::new(RecordingHost::default());
        let dispatcher = Dispatcher::new(
            Session::new(),
            Arc::new(NullRender),
            Arc::new(NullAudio),
            Arc::new(NullHud),
            host.clone(),
        );
        dispatch(&dispatcher, "quit", &[]);
        assert_eq!(*host.quits.lock(), 1);
    }

    #[test]
    fn string_commands_match_script_expectations() {
        let dispatcher = Dispatcher::headless(Session::new());
        assert_eq!(
            dispatch(
                &dispatcher,
                "extract",
                &[Value::Str("coconut".into()), Value::Int(2), Value::Int(3)]
            ),
            Value::Str("con".into())
        );
        assert_eq!(
            dispatch(
                &dispatcher,
                "split",
                &[Value::Str("a;b;c".into()), Value::Str(";".into()), Value::Int(1)]
            ),
            Value::Str("b".into())
        );
        assert_eq!(
            dispatch(
                &dispatcher,
                "replace",
                &[
                    Value::Str("Palm palm PALM".into()),
                    Value::Str("palm".into()),
                    Value::Str("tree".into())
                ]
            ),
            Value::Str("tree tree tree".into())
        );
        assert_eq!(
            dispatch(&dispatcher, "trim", &[Value::Str("  raft ".into())]),
            Value::Str("raft".into())
        );
        assert_eq!(
            dispatch(&dispatcher, "length", &[Value::Str("berry".into())]),
            Value::Int(5)
        );
        assert_eq!(
            dispatch(
                &dispatcher,
                "join",
                &[Value::List(vec![Value::Int(1), Value::Str("x".into())])]
            ),
            Value::Str("1,x".into())
        );
    }

    #[test]
    fn int_parses_leading_digits() {
        let dispatcher = Dispatcher::headless(Session::new());
        assert_eq!(
            dispatch(&dispatcher, "int", &[Value::Str("42 stones".into())]),
            Value::Int(42)
        );
        assert_eq!(
            dispatch(&dispatcher, "int", &[Value::Str("-7".into())]),
            Value::Int(-7)
        );
        assert_eq!(
            dispatch(&dispatcher, "int", &[Value::Num(3.9)]),
            Value::Int(3)
        );
        assert_eq!(
            dispatch(&dispatcher, "int", &[Value::Str("stones".into())]),
            Value::Nil
        );
    }

    #[test]
    fn random_stays_in_range() {
        let dispatcher = Dispatcher::headless(Session::new());
        for _ in 0..50 {
            let value = dispatch(
                &dispatcher,
                "random",
                &[Value::Int(5), Value::Int(10)],
            );
            let Value::Int(value) = value else {
                panic!("random returned {value:?}");
            };
            assert!((5..10).contains(&value), "{value} out of range");
        }
        for _ in 0..50 {
            let Value::Int(value) = dispatch(&dispatcher, "random", &[Value::Int(4)]) else {
                panic!("random returned a non-int");
            };
            assert!((0..4).contains(&value), "{value} out of range");
        }
    }

    #[test]
    fn freevar_clears_listed_variables() {
        let session = Session::new();
        session.set_variable("raft", Value::Int(1));
        session.set_variable("fire", Value::Int(2));
        let dispatcher = Dispatcher::headless(session.clone());
        dispatch(
            &dispatcher,
            "freevar",
            &[Value::List(vec![Value::Str("raft".into())])],
        );
        assert_eq!(session.variable("raft"), None);
        assert_eq!(session.variable("fire"), Some(Value::Int(2)));
    }

    #[test]
    fn every_implemented_command_is_wired() {
        // A catalogue entry marked implemented must not fall through to
        // the warn-and-nil arm. Queries with side-effect-free schemas
        // are exercised with obviously-valid arguments.
        let dispatcher = Dispatcher::headless(session_with_unit(1));
        for spec in commands().iter().filter(|spec| !spec.noop) {
            let args: Vec<Value> = spec
                .params
                .iter()
                .filter(|param| param.required)
                .map(|param| sample_value(param.kind))
                .collect();
            // Ignore the result; the call must simply not panic and not
            // be rejected as unknown.
            let _ = dispatcher.dispatch(spec.name, &args);
        }
    }

    fn sample_value(kind: crate::value::ParamKind) -> Value {
        use crate::value::ParamKind;
        match kind {
            ParamKind::Int | ParamKind::Class | ParamKind::State => Value::Int(1),
            ParamKind::Climate | ParamKind::Weather => Value::Int(0),
            ParamKind::Num => Value::Num(1.0),
            ParamKind::Bool => Value::Bool(true),
            ParamKind::Str => Value::Str("sample".into()),
            ParamKind::List => Value::List(vec![]),
            ParamKind::Any => Value::Int(1),
        }
    }
}
