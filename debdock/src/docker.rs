use std::path::Path;

use debdock_changelog::BuildPlan;

/// Image registering binfmt_misc handlers for foreign architectures.
const BINFMT_IMAGE: &str = "docker/binfmt:a7996909642ee92942dcd6cff44b9b95f08dad64";

/// `docker run` arguments that install QEMU binfmt handlers on the host.
pub fn binfmt_args() -> Vec<String> {
    vec![
        "run".to_string(),
        "--privileged".to_string(),
        "--rm".to_string(),
        BINFMT_IMAGE.to_string(),
    ]
}

/// `docker create` arguments for a build container.
///
/// The workspace is bind-mounted at its own path so paths inside the
/// container match the host, and the container idles on `sleep inf` until
/// build steps are exec'd into it.
pub fn create_args(plan: &BuildPlan, workspace: &Path, source: &Path) -> Vec<String> {
    let mut args = vec![
        "create".to_string(),
        "--name".to_string(),
        plan.container.clone(),
    ];

    if let Some(qemu_arch) = plan.qemu_arch {
        args.push(format!("--platform={}", plan.platform));
        let qemu = format!("/usr/bin/qemu-{}-static", qemu_arch);
        args.push("--volume".to_string());
        args.push(format!("{}:{}", qemu, qemu));
    }

    args.extend([
        "--volume".to_string(),
        format!("{}:{}", workspace.display(), workspace.display()),
        "--workdir".to_string(),
        source.display().to_string(),
        "--env".to_string(),
        "DH_VERBOSE=1".to_string(),
        "--env".to_string(),
        "DEBIAN_FRONTEND=noninteractive".to_string(),
        "--env".to_string(),
        "DPKG_COLORS=always".to_string(),
        "--env".to_string(),
        "FORCE_UNSAFE_CONFIGURE=1".to_string(),
        "--tty".to_string(),
        plan.image.clone(),
        "sleep".to_string(),
        "inf".to_string(),
    ]);

    args
}

/// `docker exec` arguments running a command inside the build container.
pub fn exec_args(container: &str, command: &[String]) -> Vec<String> {
    let mut args = vec!["exec".to_string(), container.to_string()];
    args.extend(command.iter().cloned());
    args
}
